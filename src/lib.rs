pub mod challenge;
pub mod crew;
pub mod logbook;
pub mod orchestrate;
pub mod paths;
pub mod runner;
