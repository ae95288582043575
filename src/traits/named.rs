/// A configuration block identified by its label.
///
/// Merging overrides blocks by this name and never inspects their bodies.
pub trait NamedBlock {
    fn name(&self) -> &str;
}
