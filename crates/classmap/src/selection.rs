use std::collections::BTreeSet;

use log::debug;
use tilegrid::ClassId;

use crate::{CombinationRule, ConfigError, MapConfig};

/// Resolve which raw classes must be rasterized for one tile.
///
/// Returns the precedence list with every aggregate replaced by its input
/// classes, sorted ascending. Checks run in a fixed order and the first
/// failure wins:
///
/// 1. per rule, in order: empty inputs, aggregate not in `precedence`,
///    then each input not in `precedence`;
/// 2. observed classes with no disposition (neither resolved, prioritised
///    nor ignored);
/// 3. classes both prioritised and ignored.
pub fn validate_classes(
    classes_present: &BTreeSet<u8>,
    rules: &[CombinationRule],
    precedence: &[ClassId],
    ignored: &[ClassId],
) -> Result<Vec<ClassId>, ConfigError> {
    let declared: BTreeSet<ClassId> = precedence.iter().copied().collect();
    let mut resolved = declared.clone();
    let mut aggregates = BTreeSet::new();

    // ------------------------------------------------------------------
    // Replace aggregates by their inputs, rule by rule.
    // ------------------------------------------------------------------
    for rule in rules {
        if rule.cbi.is_empty() {
            return Err(ConfigError::EmptyCombination {
                aggregate: rule.aggreg,
            });
        }

        if !declared.contains(&rule.aggreg) {
            return Err(ConfigError::AggregateNotInPrecedence {
                aggregate: rule.aggreg,
            });
        }
        resolved.remove(&rule.aggreg);

        for &class in &rule.cbi {
            if !declared.contains(&class) {
                return Err(ConfigError::CombinationInputNotInPrecedence {
                    aggregate: rule.aggreg,
                    class,
                });
            }
            // Inputs produced by an earlier rule come from the combination
            // step, not from the points.
            if !aggregates.contains(&class) {
                resolved.insert(class);
            }
        }

        aggregates.insert(rule.aggreg);
    }

    // ------------------------------------------------------------------
    // Every observed code needs a disposition.
    // ------------------------------------------------------------------
    let unhandled: Vec<u8> = classes_present
        .iter()
        .copied()
        .filter(|&code| {
            let class = ClassId::from(code);
            !resolved.contains(&class) && !declared.contains(&class) && !ignored.contains(&class)
        })
        .collect();

    if !unhandled.is_empty() {
        return Err(ConfigError::UnhandledClasses { classes: unhandled });
    }

    // ------------------------------------------------------------------
    // A prioritised class cannot be ignored at the same time.
    // ------------------------------------------------------------------
    let overlap: BTreeSet<ClassId> = precedence
        .iter()
        .copied()
        .filter(|class| ignored.contains(class))
        .collect();

    if !overlap.is_empty() {
        return Err(ConfigError::IgnoredAndPrioritized {
            classes: overlap.into_iter().collect(),
        });
    }

    Ok(resolved.into_iter().collect())
}

/// Validated class plan for one tile. Borrows rules and precedence from the
/// run configuration and is dropped with the tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSelection<'a> {
    base_classes: Vec<ClassId>,
    rules: &'a [CombinationRule],
    precedence: &'a [ClassId],
}

impl<'a> ClassSelection<'a> {
    pub fn resolve(config: &'a MapConfig, classes_present: &BTreeSet<u8>) -> Result<Self, ConfigError> {
        let base_classes = validate_classes(
            classes_present,
            config.rules(),
            config.precedence(),
            config.ignored(),
        )?;

        debug!(
            "Classes present {:?} -> rasterizing {:?}, {} rule(s), precedence {:?}",
            classes_present,
            base_classes,
            config.rules().len(),
            config.precedence()
        );

        Ok(Self {
            base_classes,
            rules: config.rules(),
            precedence: config.precedence(),
        })
    }

    /// Raw classes to rasterize, ascending.
    #[inline]
    pub fn base_classes(&self) -> &[ClassId] {
        &self.base_classes
    }

    #[inline]
    pub fn rules(&self) -> &'a [CombinationRule] {
        self.rules
    }

    #[inline]
    pub fn precedence(&self) -> &'a [ClassId] {
        self.precedence
    }

    /// `(class, rank)` pairs; rank 0 wins every tie.
    pub fn palette(&self) -> Vec<(ClassId, usize)> {
        self.precedence
            .iter()
            .enumerate()
            .map(|(rank, &class)| (class, rank))
            .collect()
    }
}
