use log::debug;
use tilegrid::Grid;

use crate::stack::is_present;
use crate::{CombinationRule, ConfigError, LayerStack, MapError};

/// Append one aggregate layer per rule, in rule order.
///
/// Each aggregate is 1 where every input class is present and 0 elsewhere.
/// Rules see the aggregates appended by the rules before them, so order
/// matters when rules chain.
pub fn apply_rules(mut stack: LayerStack, rules: &[CombinationRule]) -> Result<LayerStack, MapError> {
    for rule in rules {
        if rule.cbi.is_empty() {
            return Err(ConfigError::EmptyCombination {
                aggregate: rule.aggreg,
            }
            .into());
        }

        let combined = {
            let inputs = rule
                .cbi
                .iter()
                .map(|&class| stack.require(class))
                .collect::<Result<Vec<_>, _>>()?;

            let (rows, cols) = stack.shape();
            let mut combined = Grid::filled(rows, cols, 1.0_f32);
            for input in inputs {
                for (out, &value) in combined.data_mut().iter_mut().zip(input.data()) {
                    if !is_present(value) {
                        *out = 0.0;
                    }
                }
            }
            combined
        };

        debug!(
            "Aggregate {} from {:?}: {} px",
            rule.aggreg,
            rule.cbi,
            combined.data().iter().filter(|&&v| is_present(v)).count()
        );

        stack.push(rule.aggreg, combined)?;
    }

    Ok(stack)
}
