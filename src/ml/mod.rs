// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn directly — only this one
// and the data batcher/dataset glue.
//
// Why isolate Burn code here?
//   - If Burn's API changes, we only update this layer
//   - Other layers are testable without a GPU
//   - The model architecture is clearly separated from
//     data loading and application logic
//
// What's in this layer:
//
//   model.rs      — The CNN text-classifier architecture:
//                   • Word embedding table (optionally seeded
//                     from pre-trained vectors, frozen or not)
//                   • 1-D convolution over the token dimension
//                   • ReLU, dropout
//                   • Global max-pool over time
//                   • Linear head to 2 class logits
//
//   trainer.rs    — The training loop
//                   Handles forward pass, loss computation,
//                   backward pass, optimiser step, validation
//                   accuracy, metrics CSV and checkpointing
//
//   classifier.rs — The inference engine
//                   Loads a checkpoint, vectorises a message,
//                   runs the model and thresholds the spam
//                   probability at 0.5
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Kim (2014) Convolutional Neural Networks
//            for Sentence Classification

/// CNN spam-classifier architecture
pub mod model;

/// Full training loop with validation and checkpointing
pub mod trainer;

/// Inference engine — loads checkpoint and classifies messages
pub mod classifier;
