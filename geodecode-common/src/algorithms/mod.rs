// private sub-module defined in other files
mod is_clockwise_order;
mod poly_ops;

// exports identifiers from private sub-modules in the current module namespace
pub use self::is_clockwise_order::{
    clockwise_signed_area, is_clockwise_order, ring_orientation, RingOrientation,
    MIN_RING_VERTICES,
};
pub use self::poly_ops::{any_point_in_poly, point_in_poly};
