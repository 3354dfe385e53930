//! Step definitions shared by the application behaviour scenarios.


mod given;
mod when;
