use super::{RequestOptions, SessionClient};
use crate::error::ClientResult;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The endpoint listing the current user alongside their organization memberships.
const ME_WITH_ORGS_ENDPOINT: &str = "/api/users/me-with-orgs";

/// An organization the current user belongs to.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    /// An opaque identifier, only ever threaded through endpoint paths.
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    /// Memberships may come back without a name, in which case they never match one.
    #[serde(default)]
    pub name: Option<String>,
}

/// The subset of `me-with-orgs` we read.
/// Error bodies lack `orgs` entirely, which we treat as no memberships.
#[derive(Deserialize, Debug)]
struct MeWithOrgs {
    #[serde(default)]
    orgs: Option<Vec<Organization>>,
}

/// Identifiers are usually strings, but we accept any JSON value and keep its textual form.
fn opaque_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => id,
        other => other.to_string(),
    })
}

/// Picks an organization ID out of the given memberships.
///
/// Without a name, the first membership is our default. With a name, we look for
/// an exact match, and fall back to the first membership if there isn't one.
fn pick_organization(orgs: &[Organization], name: &str) -> Option<String> {
    let first = orgs.first()?;
    if name.is_empty() {
        return Some(first.id.clone());
    }

    let matching = orgs.iter().find(|org| org.name.as_deref() == Some(name)).unwrap_or(first);
    Some(matching.id.clone())
}

impl SessionClient {
    /// Lists the organizations the current user is a member of.
    pub async fn list_organizations(&self) -> ClientResult<Vec<Organization>> {
        let response = self
            .request(ME_WITH_ORGS_ENDPOINT, RequestOptions::default())
            .await?;
        let me: MeWithOrgs = serde_json::from_value(response)?;
        Ok(me.orgs.unwrap_or_default())
    }

    /// Resolves the organization to operate within.
    ///
    /// Returns `None` only if the user has no organizations at all.
    /// A name that matches nothing falls back to the first organization.
    pub async fn resolve_organization(&self, name: &str) -> ClientResult<Option<String>> {
        let orgs = self.list_organizations().await?;
        Ok(pick_organization(&orgs, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn memberships() -> Vec<Organization> {
        let body = json!({
            "id": "user",
            "orgs": [{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]
        });
        let me: MeWithOrgs = serde_json::from_value(body).unwrap();
        me.orgs.unwrap()
    }

    #[test]
    fn numeric_ids_keep_their_text() {
        let orgs = memberships();
        assert_eq!(orgs[0].id, "1");
        assert_eq!(orgs[1].name.as_deref(), Some("b"));
    }

    #[test]
    fn empty_name_picks_the_first_membership() {
        assert_eq!(pick_organization(&memberships(), ""), Some("1".to_string()));
    }

    #[test]
    fn exact_name_match_wins() {
        assert_eq!(pick_organization(&memberships(), "b"), Some("2".to_string()));
    }

    #[test]
    fn unknown_name_falls_back_to_the_first_membership() {
        assert_eq!(pick_organization(&memberships(), "z"), Some("1".to_string()));
        assert_eq!(pick_organization(&memberships(), "B"), Some("1".to_string()));
    }

    #[test]
    fn no_memberships_means_no_organization() {
        assert_eq!(pick_organization(&[], ""), None);
        assert_eq!(pick_organization(&[], "a"), None);
    }

    #[test]
    fn unnamed_memberships_never_match() {
        let body = json!({"orgs": [{"id": "a1", "name": null}, {"id": "b2", "name": "b"}, {"id": "c3"}]});
        let orgs = serde_json::from_value::<MeWithOrgs>(body).unwrap().orgs.unwrap();
        assert_eq!(orgs[0].name, None);
        assert_eq!(orgs[2].name, None);

        assert_eq!(pick_organization(&orgs, ""), Some("a1".to_string()));
        assert_eq!(pick_organization(&orgs, "b"), Some("b2".to_string()));
        assert_eq!(pick_organization(&orgs, "z"), Some("a1".to_string()));
    }

    #[test]
    fn memberships_print_as_json() {
        let printed = serde_json::to_value(memberships()).unwrap();
        assert_eq!(printed, json!([{"id": "1", "name": "a"}, {"id": "2", "name": "b"}]));
    }

    #[test]
    fn error_bodies_have_no_memberships() {
        let me: MeWithOrgs = serde_json::from_value(json!({"detail": "Unauthorized"})).unwrap();
        assert!(me.orgs.is_none());
        let me: MeWithOrgs = serde_json::from_value(json!({"orgs": null})).unwrap();
        assert!(me.orgs.is_none());
    }
}
