//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Sale events, series points and forecasts have no identity of their own:
/// two of them with the same attribute values are interchangeable. They are
/// immutable once built; to "modify" one, build a new one.
///
/// The trait requires:
/// - **Clone**: value objects are passed around by value
/// - **PartialEq**: value objects are compared by their attribute values
/// - **Debug**: value objects show up in logs and test failures
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
