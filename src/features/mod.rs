pub mod breathing;
pub mod carousel;
pub mod parallax;
pub mod road;
