// ABOUTME: Sealed trait pattern for engine traits.
// ABOUTME: Prevents external implementations, allowing non-breaking evolution.

/// Sealed trait to prevent external implementations.
///
/// This pattern allows us to add new methods to traits without breaking semver.
/// Only types that implement Sealed (our internal engine types) can implement
/// the engine traits.
pub trait Sealed {}
