use anchor_lang::prelude::*;

/// A requested change to one distributor parameter
///
/// `Unchanged` leaves the stored value alone, `SetTo` replaces it.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParamUpdate {
    #[default]
    Unchanged,
    SetTo(u64),
}

impl ParamUpdate {
    /// Value the parameter holds once this update is applied to `current`
    pub fn resolve(self, current: u64) -> u64 {
        match self {
            ParamUpdate::Unchanged => current,
            ParamUpdate::SetTo(value) => value,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, ParamUpdate::Unchanged)
    }
}
