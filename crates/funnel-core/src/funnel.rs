//! Static funnel data: the ordered stages rendered as pyramid tiers.

use fnv::FnvHashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FunnelError {
    #[error("stage {index} has an empty name")]
    EmptyName { index: usize },
    #[error("stage name `{name}` is used by stages {first} and {second}")]
    DuplicateName {
        name: String,
        first: usize,
        second: usize,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Metrics {
    pub volume: String,
    pub rate: String,
}

/// One funnel stage. `index` is assigned by [`Funnel`] and never changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stage {
    pub name: String,
    pub description: String,
    pub metrics: Metrics,
    pub channels: Vec<String>,
    index: usize,
}

impl Stage {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        volume: impl Into<String>,
        rate: impl Into<String>,
        channels: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            metrics: Metrics {
                volume: volume.into(),
                rate: rate.into(),
            },
            channels: channels.iter().map(|c| c.to_string()).collect(),
            index: 0,
        }
    }

    /// Two-digit, 1-based label shown next to the stage title ("01", "02", ...).
    pub fn number_label(&self) -> String {
        format!("{:02}", self.index + 1)
    }
}

#[derive(Clone, Debug)]
pub struct Funnel {
    stages: Vec<Stage>,
    by_name: FnvHashMap<String, usize>,
}

impl Funnel {
    /// Validate and index an ordered stage list. Order is preserved; index 0 is
    /// the top of the pyramid.
    pub fn new(stages: Vec<Stage>) -> Result<Self, FunnelError> {
        let mut seen: FnvHashMap<&str, usize> = FnvHashMap::default();
        for (i, s) in stages.iter().enumerate() {
            if s.name.trim().is_empty() {
                return Err(FunnelError::EmptyName { index: i });
            }
            if let Some(&first) = seen.get(s.name.as_str()) {
                return Err(FunnelError::DuplicateName {
                    name: s.name.clone(),
                    first,
                    second: i,
                });
            }
            seen.insert(s.name.as_str(), i);
        }
        Ok(Self::assemble(stages))
    }

    /// The built-in acquisition → revenue funnel.
    pub fn aarrr() -> Self {
        Self::assemble(vec![
            Stage::new(
                "Acquisition",
                "User Discovery",
                "100,000",
                "100%",
                &["SEO", "SEM", "Social", "PR"],
            ),
            Stage::new(
                "Activation",
                "First Experience",
                "5,000",
                "5%",
                &["Onboarding", "Tutorial", "Welcome"],
            ),
            Stage::new(
                "Retention",
                "Continued Usage",
                "2,000",
                "40%",
                &["Email", "Push", "In-App"],
            ),
            Stage::new(
                "Referral",
                "User Advocacy",
                "400",
                "20%",
                &["Program", "Social", "Reviews"],
            ),
            Stage::new(
                "Revenue",
                "Monetization",
                "120",
                "30%",
                &["Subscription", "Purchase", "Upsell"],
            ),
        ])
    }

    fn assemble(mut stages: Vec<Stage>) -> Self {
        let mut by_name = FnvHashMap::default();
        for (i, s) in stages.iter_mut().enumerate() {
            s.index = i;
            by_name.insert(s.name.clone(), i);
        }
        Self { stages, by_name }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn get(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
