// Lorentz force density on a current element
use crate::prelude::*;

/// Force per unit length on a current element `current` sitting in `field`, `I x B`.
/// Which current meets which field is the caller's choice.
pub fn force_density_at(field: V3, current: V3) -> V3 {
	current.cross(&field)
}

pub fn force_magnitude(field: V3, current: V3) -> Float {
	force_density_at(field, current).norm()
}
