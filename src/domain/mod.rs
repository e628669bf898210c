// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits that define the core concepts
// of the system. No Burn types, no file I/O, no ML code —
// this layer only says what things ARE.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A raw labelled example from the corpus
pub mod example;

// Core abstractions (traits) that other layers implement
pub mod traits;
