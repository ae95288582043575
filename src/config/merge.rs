//! Layers configs from least to most specific.
//!
//! Settings override field by field (`debug` is sticky). Every named block
//! collection is merged by name: a later block replaces the earlier block of
//! the same name in place, new names are appended. The merge is associative,
//! so the result does not depend on how the sequence is chunked.

use crate::traits::NamedBlock;
use crate::types::Config;
use std::collections::HashMap;

/// Overlays `later` onto `target`, by block name.
pub fn merge_named<T: NamedBlock + Clone>(target: &mut Vec<T>, later: &[T]) {
    let mut positions: HashMap<String, usize> = target
        .iter()
        .enumerate()
        .map(|(index, block)| (block.name().to_string(), index))
        .collect();
    for block in later {
        match positions.get(block.name()) {
            Some(&index) => target[index] = block.clone(),
            None => {
                positions.insert(block.name().to_string(), target.len());
                target.push(block.clone());
            }
        }
    }
}

impl Config {
    /// Overlays a more specific config onto this one.
    pub fn merge_from(&mut self, later: &Config) {
        self.settings.merge_from(&later.settings);
        merge_named(&mut self.tokens, &later.tokens);
        merge_named(&mut self.parameters, &later.parameters);
        merge_named(&mut self.hints, &later.hints);
        merge_named(&mut self.stack_matches, &later.stack_matches);
        merge_named(&mut self.templates, &later.templates);
        merge_named(&mut self.transforms, &later.transforms);
    }

    /// Returns `self` overlaid with `later`.
    #[must_use]
    pub fn merged_with(mut self, later: &Config) -> Config {
        self.merge_from(later);
        self
    }
}

/// Merges `configs`, ordered least to most specific, into one config.
///
/// The result is unique by name in every block collection, even when an input
/// declared a name twice.
pub fn merge<'a, I>(configs: I) -> Config
where
    I: IntoIterator<Item = &'a Config>,
{
    configs
        .into_iter()
        .fold(Config::default(), |acc, next| acc.merged_with(next))
}
