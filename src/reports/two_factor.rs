//
//  github-explorer
//  reports/two_factor.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Users affiliated with the enterprise who have two-factor authentication
//! disabled.

use serde::Deserialize;
use serde_json::json;

use super::nodes::{read_at, RawUser};
use super::GitHubExplorer;
use crate::api::common::ApiError;
use crate::api::queries::QueryName;
use crate::models::User;

#[derive(Debug, Deserialize)]
struct LoginNode {
    login: String,
}

impl GitHubExplorer {
    /// Logins with two-factor authentication disabled, sorted.
    pub async fn all_two_factor_disabled(&self) -> Result<Vec<String>, ApiError> {
        let nodes: Vec<LoginNode> = self
            .paginator
            .paginate(QueryName::TwoFactorDisabled, json!({ "slug": self.enterprise }))
            .await?;

        let mut logins: Vec<String> = nodes.into_iter().map(|n| n.login).collect();
        logins.sort();
        Ok(logins)
    }

    /// Full records of users with two-factor authentication disabled, in
    /// response order. `member` tells whether the user belongs to this
    /// organisation.
    pub async fn two_factor_disabled_users(&self) -> Result<Vec<User>, ApiError> {
        let paginated = self
            .paginator
            .paginate_pages::<RawUser>(
                QueryName::TwoFactorDisabledUsers,
                json!({ "login": self.organisation, "slug": self.enterprise }),
            )
            .await?;

        let organisation_name: Option<String> =
            read_at(&paginated.first_page, &["organization", "name"])?;

        Ok(paginated
            .nodes
            .into_iter()
            .map(|raw| {
                let member = organisation_name
                    .as_deref()
                    .map(|org| raw.in_organisation_named(org))
                    .unwrap_or(false);
                User {
                    member: Some(member),
                    ..raw.profile()
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::api::testing::{page, ScriptedTransport};
    use crate::reports::test_support::explorer;

    const DISABLED: &[&str] = &["enterprise", "ownerInfo", "affiliatedUsersWithTwoFactorDisabled"];

    #[tokio::test]
    async fn test_all_two_factor_disabled_sorted() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            page(
                DISABLED,
                "nodes",
                vec![json!({ "login": "zoe" }), json!(null), json!({ "login": "abe" })],
                Some("t1"),
            ),
            page(DISABLED, "nodes", vec![json!({ "login": "max" })], None),
        ]));

        let logins = explorer(&transport).all_two_factor_disabled().await.unwrap();
        assert_eq!(logins, ["abe", "max", "zoe"]);
    }

    #[tokio::test]
    async fn test_two_factor_disabled_users_membership() {
        let mut response = page(
            DISABLED,
            "nodes",
            vec![
                json!({ "login": "in", "organizations": { "nodes": [{ "name": "Acme" }] } }),
                json!({ "login": "out", "organizations": { "nodes": [{ "name": "Globex" }] } }),
            ],
            None,
        );
        response["data"]["organization"] = json!({ "name": "Acme" });

        let transport = Arc::new(ScriptedTransport::new(vec![response]));
        let users = explorer(&transport).two_factor_disabled_users().await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].member, Some(true));
        assert_eq!(users[1].member, Some(false));
    }
}
