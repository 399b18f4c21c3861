//! Lifecycle state shared by tags and tag groups

/// Lifecycle state of a server-side entity.
///
/// Entities rebuilt from the store start as `Created`: they exist on the
/// server and clients may subscribe to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntityState {
    /// Allocated, not yet announced
    #[default]
    Reserved,
    /// Fully created
    Created,
}
