use anyhow::{bail, Context, Result};
use tch::{kind::Kind, CModule, Device, Tensor};

use crate::config;
use crate::error::ApiError;
use crate::types::ModelVariant;

/// Read-only regression model. The trait seam exists so handlers can be
/// exercised without a TorchScript artifact on disk.
pub trait Predictor: Send + Sync {
    /// Runs one forward pass over an ordered feature vector and returns the
    /// predicted optimal pit lap.
    fn predict(&self, features: &[f32]) -> Result<f64, ApiError>;

    fn input_dim(&self) -> usize;
}

/// TorchScript regressor loaded on CPU.
pub struct TorchModel {
    model: CModule,
    device: Device,
    in_dim: usize,
}

impl TorchModel {
    /// Loads and probes the artifact. Any failure here is startup-fatal and
    /// propagates out of `main`; there is no degraded mode.
    pub fn load(path: &str, in_dim: usize) -> Result<Self> {
        let device = Device::Cpu;

        let model = CModule::load_on_device(path, device)
            .with_context(|| format!("failed to load TorchScript model from {path}"))?;

        // Probe with a dummy forward: expect one scalar per row. This also
        // warms up the JIT before the first real request.
        let dummy = Tensor::zeros([1, in_dim as i64], (Kind::Float, device));
        let out = model.forward_ts(&[dummy])?;
        let sz = out.size();
        if !matches!(sz.as_slice(), [1] | [1, 1]) {
            bail!("unexpected model output size: {:?}", sz);
        }
        tracing::info!("warmup forward ok for {}", path);

        Ok(Self {
            model,
            device,
            in_dim,
        })
    }
}

impl Predictor for TorchModel {
    fn predict(&self, features: &[f32]) -> Result<f64, ApiError> {
        if features.len() != self.in_dim {
            return Err(ApiError::Encoding(format!(
                "feature length mismatch: got {}, expected {}",
                features.len(),
                self.in_dim
            )));
        }

        let input = Tensor::from_slice(features)
            .reshape([1, self.in_dim as i64])
            .to_device(self.device);

        let out = self
            .model
            .forward_ts(&[input])
            .map_err(|e| ApiError::Inference(e.to_string()))?
            .reshape([-1i64]);
        if out.size() != [1] {
            return Err(ApiError::Inference(format!(
                "unexpected model output size: {:?}",
                out.size()
            )));
        }

        Ok(out.double_value(&[0]))
    }

    fn input_dim(&self) -> usize {
        self.in_dim
    }
}

/// Both loaded models, shared read-only across requests.
pub struct ModelBank {
    pub single: Box<dyn Predictor>,
    pub multi: Box<dyn Predictor>,
}

impl ModelBank {
    /// Ordered startup load: single-season first, then multi-season.
    pub fn load(single_path: &str, multi_path: &str) -> Result<Self> {
        let single = TorchModel::load(single_path, config::SINGLE_SEASON_FEATURES.len())
            .with_context(|| "loading single-season model")?;
        tracing::info!(
            "loaded single-season model from {} ({} features)",
            single_path,
            single.input_dim()
        );

        let multi = TorchModel::load(multi_path, config::MULTI_SEASON_FEATURES.len())
            .with_context(|| "loading multi-season model")?;
        tracing::info!(
            "loaded multi-season model from {} ({} features)",
            multi_path,
            multi.input_dim()
        );

        Ok(Self {
            single: Box::new(single),
            multi: Box::new(multi),
        })
    }

    pub fn for_variant(&self, variant: ModelVariant) -> &dyn Predictor {
        match variant {
            ModelVariant::Single => self.single.as_ref(),
            ModelVariant::Multi => self.multi.as_ref(),
        }
    }
}
