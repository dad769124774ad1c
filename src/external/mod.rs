pub mod waqi;
