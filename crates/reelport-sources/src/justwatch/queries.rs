//! GraphQL documents for the JustWatch private API.
//!
//! These shapes are an unversioned contract owned by JustWatch; they were
//! captured from the web client and can change without notice.

pub const SEARCH_TITLES: &str = r#"
query GetSearchTitles(
    $country: Country!
    $language: Language!
    $searchTitlesFilter: TitleFilter
    $searchTitlesSortBy: PopularTitlesSorting! = POPULAR
) {
    popularTitles(
        first: 1
        country: $country
        filter: $searchTitlesFilter
        sortBy: $searchTitlesSortBy
    ) {
        edges {
            node {
                id
                objectType
                content(country: $country, language: $language) {
                    title
                    originalReleaseYear
                }
            }
        }
    }
}
"#;

pub const SET_IN_WATCHLIST: &str = r#"
mutation SetInWatchlist($input: SetInTitleListInput!) {
    setInWatchlistV2(input: $input) {
        title {
            id
        }
    }
}
"#;

pub const SET_IN_SEENLIST: &str = r#"
mutation SetInSeenlist($input: SetInSeenlistInput!, $country: Country!) {
    setInSeenlist(input: $input) {
        title {
            id
            ... on Movie {
                seenlistEntry {
                    createdAt
                }
            }
            ... on Show {
                seenState(country: $country) {
                    progress
                    caughtUp
                }
            }
        }
    }
}
"#;
