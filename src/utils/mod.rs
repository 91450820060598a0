// src/utils/mod.rs

pub mod timer;
