//! `TrialSequentialAnalysis` builder and batch runs.

use tsa_core::constants::RIS_SENTINEL;
use tsa_core::{run_tsa, BoundaryError, FutilityBoundaryType, Study, TsaResult};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::Config;
use crate::error::TsaError;

/// Builder for trial sequential analyses.
///
/// ```
/// use tsa::{Study, TrialSequentialAnalysis};
///
/// let studies = vec![
///     Study::new("a", "Trial A", 2001, 12, 150, 22, 148),
///     Study::new("b", "Trial B", 2004, 30, 400, 48, 402),
/// ];
/// let result = TrialSequentialAnalysis::new()
///     .control_rate(0.15)
///     .relative_risk_reduction(35.0)
///     .run(&studies)
///     .unwrap()
///     .expect("non-empty study list");
/// assert_eq!(result.records.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TrialSequentialAnalysis {
    config: Config,
}

impl TrialSequentialAnalysis {
    /// Create an analysis with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analysis with [`Config::conservative`] settings.
    pub fn conservative() -> Self {
        Self::with_config(Config::conservative())
    }

    /// Create an analysis with [`Config::exploratory`] settings.
    pub fn exploratory() -> Self {
        Self::with_config(Config::exploratory())
    }

    /// Create an analysis from an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Set the two-sided Type-I error. Panics outside (0, 0.5).
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.config = self.config.alpha(alpha);
        self
    }

    /// Set the Type-II error. Panics outside (0, 0.5).
    pub fn beta(mut self, beta: f64) -> Self {
        self.config = self.config.beta(beta);
        self
    }

    /// Set the anticipated control-arm event rate. Panics outside (0, 1).
    pub fn control_rate(mut self, rate: f64) -> Self {
        self.config = self.config.control_rate(rate);
        self
    }

    /// Set the anticipated relative risk reduction in percent. Panics outside
    /// (0, 100).
    pub fn relative_risk_reduction(mut self, percent: f64) -> Self {
        self.config = self.config.relative_risk_reduction(percent);
        self
    }

    /// Set the heterogeneity correction factor. Panics below 1.
    pub fn heterogeneity_correction(mut self, factor: f64) -> Self {
        self.config = self.config.heterogeneity_correction(factor);
        self
    }

    /// Set the futility boundary policy.
    pub fn futility(mut self, policy: FutilityBoundaryType) -> Self {
        self.config = self.config.futility(policy);
        self
    }

    /// Enable or disable the I² adjustment of the information size.
    pub fn i2_adjustment(mut self, enabled: bool) -> Self {
        self.config = self.config.i2_adjustment(enabled);
        self
    }

    /// Run the analysis over `studies` in the order given.
    ///
    /// Returns `Ok(None)` for an empty study list. Inputs are not validated;
    /// use [`run_checked`](Self::run_checked) to reject bad studies and
    /// parameters up front.
    pub fn run(&self, studies: &[Study]) -> Result<Option<TsaResult>, BoundaryError> {
        let params = self.config.to_design_parameters();
        tracing::debug!(
            studies = studies.len(),
            alpha = params.alpha,
            beta = params.beta,
            futility = %params.futility,
            "running trial sequential analysis"
        );

        let result = run_tsa(studies, &params)?;

        match &result {
            Some(result) => {
                if result.required_information_size == RIS_SENTINEL {
                    tracing::warn!(
                        control_rate = params.control_rate,
                        relative_risk_reduction = params.relative_risk_reduction,
                        "design cannot be sized; using placeholder information size"
                    );
                }
                tracing::info!(
                    ris = result.required_information_size,
                    ris_used = result.information_size_used,
                    records = result.records.len(),
                    conclusion = %result.conclusion(),
                    "analysis finished"
                );
            }
            None => tracing::debug!("empty study list; nothing to analyze"),
        }

        Ok(result)
    }

    /// Validate the configuration and every study, then run.
    ///
    /// An empty study list is an error here rather than `None`.
    pub fn run_checked(&self, studies: &[Study]) -> Result<TsaResult, TsaError> {
        self.config.validate()?;
        for study in studies {
            study.validate()?;
        }
        self.run(studies)?.ok_or(TsaError::EmptyStudyList)
    }
}

/// Run the same analysis over several independent study lists.
///
/// Results are returned in input order. With the `parallel` feature the
/// lists are analyzed on the rayon thread pool; each individual analysis is
/// always sequential.
pub fn run_batch(
    analysis: &TrialSequentialAnalysis,
    study_lists: &[Vec<Study>],
) -> Vec<Result<Option<TsaResult>, BoundaryError>> {
    #[cfg(feature = "parallel")]
    let results = study_lists
        .par_iter()
        .map(|studies| analysis.run(studies))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results = study_lists
        .iter()
        .map(|studies| analysis.run(studies))
        .collect();

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsa_core::Conclusion;

    fn studies() -> Vec<Study> {
        vec![
            Study::new("a", "A", 2001, 40, 1000, 80, 1000),
            Study::new("b", "B", 2004, 45, 1000, 85, 1000),
        ]
    }

    #[test]
    fn test_builder_forwards_to_config() {
        let analysis = TrialSequentialAnalysis::new()
            .alpha(0.01)
            .beta(0.1)
            .heterogeneity_correction(1.5)
            .futility(FutilityBoundaryType::None);
        assert_eq!(analysis.config().alpha, 0.01);
        assert_eq!(analysis.config().beta, 0.1);
        assert_eq!(analysis.config().heterogeneity_correction, 1.5);
        assert_eq!(analysis.config().futility, FutilityBoundaryType::None);
    }

    #[test]
    fn test_run() {
        let result = TrialSequentialAnalysis::new()
            .run(&studies())
            .unwrap()
            .unwrap();
        assert_eq!(result.conclusion(), Conclusion::ConclusiveBenefit);
        assert!(TrialSequentialAnalysis::new().run(&[]).unwrap().is_none());
    }

    #[test]
    fn test_run_checked() {
        let analysis = TrialSequentialAnalysis::new();
        assert!(analysis.run_checked(&studies()).is_ok());
        assert!(matches!(
            analysis.run_checked(&[]),
            Err(TsaError::EmptyStudyList)
        ));

        let bad = vec![Study::new("x", "X", 2000, 5, 4, 1, 10)];
        assert!(matches!(analysis.run_checked(&bad), Err(TsaError::Study(_))));

        let mut config = Config::default();
        config.alpha = 0.7;
        assert!(matches!(
            TrialSequentialAnalysis::with_config(config).run_checked(&studies()),
            Err(TsaError::Parameter(_))
        ));

        let pocock = analysis.clone().futility(FutilityBoundaryType::Pocock);
        assert!(matches!(
            pocock.run_checked(&studies()),
            Err(TsaError::Boundary(_))
        ));
    }

    #[test]
    fn test_run_batch_keeps_order() {
        let lists = vec![studies(), Vec::new(), studies()[..1].to_vec()];
        let results = run_batch(&TrialSequentialAnalysis::new(), &lists);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().as_ref().unwrap().records.len(), 2);
        assert!(results[1].as_ref().unwrap().is_none());
        assert_eq!(results[2].as_ref().unwrap().as_ref().unwrap().records.len(), 1);
    }
}
