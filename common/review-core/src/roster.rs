//! Reviewer roster: team slugs, display names, and members

use std::collections::BTreeSet;

/// One resolved team
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterTeam {
    pub slug: String,
    pub name: String,
    pub members: BTreeSet<String>,
}

/// Teams in the order they were requested. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    teams: Vec<RosterTeam>,
}

impl Roster {
    pub fn builder() -> RosterBuilder {
        RosterBuilder::default()
    }

    pub fn teams(&self) -> &[RosterTeam] {
        &self.teams
    }

    /// Whether `login` belongs to any team
    pub fn is_member(&self, login: &str) -> bool {
        self.teams.iter().any(|t| t.members.contains(login))
    }

    pub fn member_count(&self) -> usize {
        self.teams
            .iter()
            .flat_map(|t| t.members.iter())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

#[derive(Debug, Default)]
pub struct RosterBuilder {
    teams: Vec<RosterTeam>,
}

impl RosterBuilder {
    /// Add a team. `name` falls back to the slug when unknown.
    pub fn team<I, S>(mut self, slug: &str, name: Option<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.teams.push(RosterTeam {
            slug: slug.to_string(),
            name: name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| slug.to_string()),
            members: members.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn build(self) -> Roster {
        Roster { teams: self.teams }
    }
}

/// Split a comma-separated slug list, trimming blanks
pub fn parse_team_slugs(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_across_teams() {
        let roster = Roster::builder()
            .team("streaming-platform", Some("Streaming Platform".into()), ["alice", "bob"])
            .team("ingest", None, ["bob", "carol"])
            .build();

        assert!(roster.is_member("alice"));
        assert!(roster.is_member("carol"));
        assert!(!roster.is_member("Alice"));
        assert_eq!(roster.member_count(), 3);
        assert_eq!(roster.teams()[1].name, "ingest");
    }

    #[test]
    fn test_failed_team_keeps_slot() {
        let roster = Roster::builder()
            .team("ghost-team", None, Vec::<String>::new())
            .build();
        assert_eq!(roster.teams().len(), 1);
        assert!(roster.teams()[0].members.is_empty());
    }

    #[test]
    fn test_parse_team_slugs() {
        assert_eq!(
            parse_team_slugs(" streaming-platform, ingest ,,"),
            vec!["streaming-platform", "ingest"]
        );
        assert!(parse_team_slugs("").is_empty());
    }
}
