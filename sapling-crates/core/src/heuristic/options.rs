/// How the relaxed plan extracted from the support structure is turned into a cost.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ExtractionPolicy {
    /// Every action counts once per layer it is used in.
    #[default]
    Propositional,
    /// Every action counts once per distinct set of atoms it is used under; gives larger but
    /// more discriminating estimates.
    Supported,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicOptions {
    pub extraction_policy: ExtractionPolicy,
}
