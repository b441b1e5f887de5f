pub mod normalize;
pub mod test_utils;

pub use normalize::normalize;
