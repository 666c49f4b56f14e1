// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full train + validation loop using Burn's DataLoader and Adam.
//
// Key Burn backend insight:
//   - Training uses MyBackend (Autodiff<Wgpu>) for gradients
//   - model.valid() returns model on MyInnerBackend (Wgpu)
//   - Validation batcher must also use MyInnerBackend
//   - argmax(1) returns [batch,1] so we flatten before .equal()
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::SpamBatcher, dataset::SpamDataset};
use crate::embedding::matrix::EmbeddingMatrix;
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{EmbeddingInit, SpamCnnConfig, SpamCnnModel};

type MyBackend      = burn::backend::Autodiff<burn::backend::Wgpu>;
type MyInnerBackend = burn::backend::Wgpu;

pub fn run_training(
    cfg:              &TrainConfig,
    train_dataset:    SpamDataset,
    val_dataset:      SpamDataset,
    embedding_matrix: Option<EmbeddingMatrix>,
    ckpt_manager:     CheckpointManager,
) -> Result<()> {
    let device = burn::backend::wgpu::WgpuDevice::default();
    tracing::info!("Using WGPU device: {:?}", device);
    train_loop(cfg, train_dataset, val_dataset, embedding_matrix, ckpt_manager, device)
}

fn train_loop(
    cfg:              &TrainConfig,
    train_dataset:    SpamDataset,
    val_dataset:      SpamDataset,
    embedding_matrix: Option<EmbeddingMatrix>,
    ckpt_manager:     CheckpointManager,
    device:           burn::backend::wgpu::WgpuDevice,
) -> Result<()> {

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = SpamCnnConfig::new(
        cfg.vocab_size, cfg.embed_dim, cfg.num_filters, cfg.kernel_size, cfg.dropout,
    );
    let mut model: SpamCnnModel<MyBackend> = model_cfg.init(&device);

    // Seed the embedding table according to the configured variant
    model = match (cfg.embedding_init, &embedding_matrix) {
        (EmbeddingInit::Random, _) => model,
        (EmbeddingInit::Frozen, Some(matrix)) => {
            tracing::info!("Seeding frozen embedding table from pre-trained matrix");
            model.with_embedding_weights(matrix, false, &device)
        }
        (EmbeddingInit::FineTuned, Some(matrix)) => {
            tracing::info!("Seeding trainable embedding table from pre-trained matrix");
            model.with_embedding_weights(matrix, true, &device)
        }
        (init, None) => {
            // The use case always supplies a matrix for the pretrained
            // variants; if it somehow didn't, train from scratch.
            tracing::warn!("No embedding matrix available for {:?} — training from scratch", init);
            model
        }
    };
    tracing::info!(
        "Model ready: {} filters of width {}, embed_dim={}",
        cfg.num_filters, cfg.kernel_size, cfg.embed_dim
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let optim_cfg = AdamConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    // ── Metrics CSV ───────────────────────────────────────────────────────────
    let metrics = MetricsLogger::new(&cfg.checkpoint_dir)?;

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_batcher = SpamBatcher::<MyBackend>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(42)
        .num_workers(1)
        .build(train_dataset);

    // ── Validation data loader (InnerBackend — no autodiff overhead) ──────────
    let val_batcher = SpamBatcher::<MyInnerBackend>::new(device.clone());
    let val_loader  = DataLoaderBuilder::new(val_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(val_dataset);

    // ── Epoch loop ────────────────────────────────────────────────────────────
    // Track the best-validation epoch so the run summary points
    // at the checkpoint worth keeping
    let mut best_val_loss = f64::INFINITY;
    let mut best_epoch    = 0usize;

    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;

        for batch in train_loader.iter() {
            let (loss, _) = model.forward_loss(batch.input_ids, batch.targets);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            train_loss_sum += loss_val;
            train_batches  += 1;

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let avg_train_loss = if train_batches > 0 {
            train_loss_sum / train_batches as f64
        } else { f64::NAN };

        // ── Validation phase ──────────────────────────────────────────────────
        // model.valid() → SpamCnnModel<MyInnerBackend>
        // dropout disabled for deterministic evaluation
        let model_valid = model.valid();

        let mut val_loss_sum  = 0.0f64;
        let mut val_batches   = 0usize;
        let mut correct       = 0usize;
        let mut total_samples = 0usize;

        for batch in val_loader.iter() {
            let logits = model_valid.forward(batch.input_ids);

            let ce = burn::nn::loss::CrossEntropyLossConfig::new()
                .init(&logits.device());

            let batch_loss: f64 = ce
                .forward(logits.clone(), batch.targets.clone())
                .into_scalar().elem::<f64>();
            val_loss_sum += batch_loss;
            val_batches  += 1;

            // argmax(1) returns shape [batch, 1] — flatten to [batch]
            // before comparing with targets which is [batch]
            let predicted = logits.argmax(1).flatten::<1>(0, 1);

            let batch_count = batch.targets.dims()[0];
            if predicted.dims()[0] != batch_count {
                // Counts disagree — report and keep going rather than abort
                tracing::warn!(
                    "Prediction/label count mismatch: {} vs {} — skipping batch",
                    predicted.dims()[0], batch_count
                );
                continue;
            }
            total_samples += batch_count;

            let batch_correct: i64 = predicted
                .equal(batch.targets)
                .int().sum().into_scalar().elem::<i64>();
            correct += batch_correct as usize;
        }

        let avg_val_loss = if val_batches   > 0 { val_loss_sum / val_batches as f64 } else { f64::NAN };
        let val_acc      = if total_samples > 0 { correct as f64 / total_samples as f64 } else { 0.0 };

        println!(
            "Epoch {:>3}/{} | train_loss={:.4} | val_loss={:.4} | val_acc={:.1}%",
            epoch, cfg.epochs, avg_train_loss, avg_val_loss, val_acc * 100.0,
        );

        let epoch_metrics = EpochMetrics::new(epoch, avg_train_loss, avg_val_loss, val_acc);
        if epoch_metrics.is_improvement(best_val_loss) {
            best_val_loss = epoch_metrics.val_loss;
            best_epoch    = epoch;
            tracing::info!("New best val_loss {:.4} at epoch {}", best_val_loss, epoch);
        }
        metrics.log(&epoch_metrics)?;

        ckpt_manager.save_model(&model, epoch)?;
        tracing::info!("Checkpoint saved for epoch {}", epoch);
    }

    if best_epoch > 0 {
        tracing::info!("Best epoch: {} (val_loss {:.4})", best_epoch, best_val_loss);
    }
    tracing::info!("Training complete!");
    Ok(())
}
