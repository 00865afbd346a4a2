/// Access level granted to a member for a project's repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessTier {
    None,
    Read,
    ReadWrite,
}

/// Resolution order when a role id is listed in both role sets.
///
/// `ReadWins` is the default: the read set is checked first, so a role in
/// both sets resolves to read-only access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    #[default]
    ReadWins,
    ReadWriteWins,
}

/// Maps role ids to access tiers using two externally supplied role sets.
/// The sets are disjoint by convention, not enforced; see [`TieBreak`].
#[derive(Debug, Clone)]
pub struct RolePolicy {
    read_roles: Vec<i64>,
    read_write_roles: Vec<i64>,
    tie_break: TieBreak,
}

impl RolePolicy {
    pub fn new(read_roles: Vec<i64>, read_write_roles: Vec<i64>) -> Self {
        Self {
            read_roles,
            read_write_roles,
            tie_break: TieBreak::default(),
        }
    }

    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Resolves a role id to an access tier. Pure function of the role id
    /// and the configured sets; a role absent from both sets gets no access.
    pub fn resolve(&self, role_id: i64) -> AccessTier {
        let read = self.read_roles.contains(&role_id);
        let read_write = self.read_write_roles.contains(&role_id);

        match (read, read_write) {
            (true, true) => match self.tie_break {
                TieBreak::ReadWins => AccessTier::Read,
                TieBreak::ReadWriteWins => AccessTier::ReadWrite,
            },
            (true, false) => AccessTier::Read,
            (false, true) => AccessTier::ReadWrite,
            (false, false) => AccessTier::None,
        }
    }
}
