// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal each:
// training a classifier or predicting a label. No ML math, no
// printing of results (Layer 1's job), only workflow
// coordination.
//
// Reference: Clean Architecture pattern

// The training workflow
pub mod train_use_case;

// The label-prediction workflow
pub mod predict_use_case;
