pub mod anim;
pub mod bezier;
