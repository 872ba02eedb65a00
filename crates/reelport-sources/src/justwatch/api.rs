use crate::error::ServiceError;
use crate::justwatch::client::JustWatchClient;
use crate::justwatch::queries;
use reelport_models::{ResolvedTitle, TitleKind};
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Search JustWatch by title name and return the top-ranked candidate.
///
/// Tie-break policy is the service's own popularity ranking: the query asks
/// for one result and we take it as-is, no local re-ranking.
pub async fn search_title(
    client: &JustWatchClient,
    title: &str,
    kind: TitleKind,
    year: Option<u32>,
) -> Result<Option<ResolvedTitle>, ServiceError> {
    debug!(title, %kind, ?year, "Searching JustWatch");

    let variables = search_variables(client.country(), client.language(), title, kind, year);
    let body = client.post_graphql(queries::SEARCH_TITLES, variables).await?;

    let resolved = parse_search_response(&body, kind);
    if let Some(ref found) = resolved {
        debug!(
            id = %found.id,
            found_title = %found.title,
            found_year = ?found.year,
            "Search hit"
        );
    }
    Ok(resolved)
}

/// Add a resolved title to the account watchlist.
pub async fn set_in_watchlist(
    client: &JustWatchClient,
    title_id: &str,
) -> Result<(), ServiceError> {
    let variables = json!({
        "input": { "id": title_id, "state": true },
    });
    let body = client
        .post_graphql(queries::SET_IN_WATCHLIST, variables)
        .await?;

    if mutation_confirmed(&body, "setInWatchlistV2") {
        Ok(())
    } else {
        Err(ServiceError::Api(format!(
            "setInWatchlistV2 returned no title for id '{}'",
            title_id
        )))
    }
}

/// Mark a resolved title as seen.
pub async fn set_in_seenlist(
    client: &JustWatchClient,
    title_id: &str,
) -> Result<(), ServiceError> {
    let variables = json!({
        "input": {
            "id": title_id,
            "state": true,
            "country": client.country(),
        },
        "country": client.country(),
    });
    let body = client
        .post_graphql(queries::SET_IN_SEENLIST, variables)
        .await?;

    if mutation_confirmed(&body, "setInSeenlist") {
        Ok(())
    } else {
        Err(ServiceError::Api(format!(
            "setInSeenlist returned no title for id '{}'",
            title_id
        )))
    }
}

fn search_variables(
    country: &str,
    language: &str,
    title: &str,
    kind: TitleKind,
    year: Option<u32>,
) -> Value {
    let mut filter = json!({
        "objectTypes": [kind.object_type()],
        "excludeIrrelevantTitles": false,
        "includeTitlesWithoutUrl": true,
        "searchQuery": title,
    });
    if let Some(y) = year {
        filter["releaseYear"] = json!({ "min": y, "max": y });
    }

    json!({
        "searchTitlesSortBy": "POPULAR",
        "searchTitlesFilter": filter,
        // The API wants the primary subtag here ("en", not "en-US")
        "language": primary_language_subtag(language),
        "country": country,
    })
}

fn primary_language_subtag(language: &str) -> &str {
    language.split('-').next().unwrap_or(language)
}

/// Pull the first search edge out of a response body, if any.
///
/// The search filter pins `objectTypes` to `requested`, so the response is
/// expected to echo it back; anything else is logged and treated as the
/// requested kind rather than trusted.
fn parse_search_response(body: &Value, requested: TitleKind) -> Option<ResolvedTitle> {
    let node = body
        .get("data")?
        .get("popularTitles")?
        .get("edges")?
        .as_array()?
        .first()?
        .get("node")?;

    let id = node.get("id")?.as_str()?.to_string();
    let content = node.get("content")?;
    let title = content.get("title")?.as_str()?.to_string();
    let year = content
        .get("originalReleaseYear")
        .and_then(|y| y.as_u64())
        .map(|y| y as u32);
    let kind = match node.get("objectType").and_then(|t| t.as_str()) {
        Some("MOVIE") => TitleKind::Movie,
        Some("SHOW") => TitleKind::Show,
        other => {
            warn!(%id, object_type = ?other, "Unrecognized objectType in search result");
            requested
        }
    };

    Some(ResolvedTitle { id, title, year, kind })
}

/// A mutation succeeded iff its payload carries a title object.
fn mutation_confirmed(body: &Value, mutation: &str) -> bool {
    body.get("data")
        .and_then(|d| d.get(mutation))
        .and_then(|m| m.get("title"))
        .map(|t| !t.is_null())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_body(edges: Value) -> Value {
        json!({ "data": { "popularTitles": { "edges": edges } } })
    }

    #[test]
    fn test_parse_search_response_first_edge() {
        let body = search_body(json!([
            {
                "node": {
                    "id": "tm92641",
                    "objectType": "MOVIE",
                    "content": { "title": "The Matrix", "originalReleaseYear": 1999 }
                }
            },
            {
                "node": {
                    "id": "tm0000",
                    "objectType": "MOVIE",
                    "content": { "title": "The Matrix Reloaded", "originalReleaseYear": 2003 }
                }
            }
        ]));

        let resolved = parse_search_response(&body, TitleKind::Movie).unwrap();
        assert_eq!(resolved.id, "tm92641");
        assert_eq!(resolved.title, "The Matrix");
        assert_eq!(resolved.year, Some(1999));
        assert_eq!(resolved.kind, TitleKind::Movie);
    }

    #[test]
    fn test_parse_search_response_show() {
        let body = search_body(json!([
            {
                "node": {
                    "id": "ts20233",
                    "objectType": "SHOW",
                    "content": { "title": "Breaking Bad", "originalReleaseYear": 2008 }
                }
            }
        ]));

        let resolved = parse_search_response(&body, TitleKind::Show).unwrap();
        assert_eq!(resolved.kind, TitleKind::Show);
    }

    #[test]
    fn test_parse_search_response_unknown_type_uses_requested_kind() {
        let body = search_body(json!([
            {
                "node": {
                    "id": "ts555",
                    "objectType": "SHOW_SEASON",
                    "content": { "title": "Dark", "originalReleaseYear": 2017 }
                }
            }
        ]));

        let resolved = parse_search_response(&body, TitleKind::Show).unwrap();
        assert_eq!(resolved.kind, TitleKind::Show);

        let missing_type = search_body(json!([
            {
                "node": {
                    "id": "tm777",
                    "content": { "title": "Heat", "originalReleaseYear": 1995 }
                }
            }
        ]));
        let resolved = parse_search_response(&missing_type, TitleKind::Movie).unwrap();
        assert_eq!(resolved.kind, TitleKind::Movie);
    }

    #[test]
    fn test_parse_search_response_no_results() {
        assert!(parse_search_response(&search_body(json!([])), TitleKind::Movie).is_none());
        assert!(parse_search_response(&json!({ "data": null }), TitleKind::Movie).is_none());
        assert!(parse_search_response(&json!({}), TitleKind::Movie).is_none());
    }

    #[test]
    fn test_search_variables_with_year() {
        let vars = search_variables("US", "en-US", "The Matrix", TitleKind::Movie, Some(1999));
        assert_eq!(vars["country"], "US");
        assert_eq!(vars["language"], "en");
        let filter = &vars["searchTitlesFilter"];
        assert_eq!(filter["searchQuery"], "The Matrix");
        assert_eq!(filter["objectTypes"][0], "MOVIE");
        assert_eq!(filter["releaseYear"]["min"], 1999);
        assert_eq!(filter["releaseYear"]["max"], 1999);
    }

    #[test]
    fn test_search_variables_without_year() {
        let vars = search_variables("DE", "de-DE", "Dark", TitleKind::Show, None);
        assert_eq!(vars["language"], "de");
        assert!(vars["searchTitlesFilter"].get("releaseYear").is_none());
        assert_eq!(vars["searchTitlesFilter"]["objectTypes"][0], "SHOW");
    }

    #[test]
    fn test_mutation_confirmed() {
        let ok = json!({ "data": { "setInWatchlistV2": { "title": { "id": "tm1" } } } });
        assert!(mutation_confirmed(&ok, "setInWatchlistV2"));

        let null_title = json!({ "data": { "setInWatchlistV2": { "title": null } } });
        assert!(!mutation_confirmed(&null_title, "setInWatchlistV2"));

        let missing = json!({ "data": {} });
        assert!(!mutation_confirmed(&missing, "setInWatchlistV2"));
        assert!(!mutation_confirmed(&ok, "setInSeenlist"));
    }
}
