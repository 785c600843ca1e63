/// Partial-update field semantics.
///
/// A field in an update request is applied only when it is present *and*
/// truthy:
///
/// - absent or `null` → unchanged
/// - `""` or `0` → unchanged (an empty value cannot clear a field)
/// - any array, including `[]` → overwrites
/// - anything else → overwrites, after validation
pub trait Falsy {
    fn is_falsy(&self) -> bool;
}

impl Falsy for String {
    fn is_falsy(&self) -> bool {
        self.is_empty()
    }
}

impl Falsy for i32 {
    fn is_falsy(&self) -> bool {
        *self == 0
    }
}

impl<T> Falsy for Vec<T> {
    fn is_falsy(&self) -> bool {
        false
    }
}

/// Drops a supplied value that counts as "not supplied".
pub fn supplied<T: Falsy>(value: Option<T>) -> Option<T> {
    value.filter(|v| !v.is_falsy())
}

/// Overwrites `target` when a change is present.
pub fn overwrite<T>(target: &mut T, change: Option<T>) {
    if let Some(value) = change {
        *target = value;
    }
}
