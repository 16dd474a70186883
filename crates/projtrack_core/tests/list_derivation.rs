use projtrack_core::{
    derive_view, ListQuery, MemoryProjectRepository, Project, ProjectRepository, ProjectService,
    SortOrder, DEFAULT_COVER_IMAGE,
};

fn project(id: i64, name: &str, start_date: &str, end_date: &str, favorite: bool) -> Project {
    Project {
        id,
        name: name.to_string(),
        client: "Acme".to_string(),
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
        is_favorite: favorite,
        cover_image: DEFAULT_COVER_IMAGE.to_string(),
    }
}

fn sample_set() -> Vec<Project> {
    vec![
        project(1, "Zeta", "2024-03-01", "2024-09-01", true),
        project(2, "Alpha", "2024-01-01", "2023-06-01", false),
        project(3, "Madeira", "2023-11-15", "2024-01-01", true),
        project(4, "alpine", "2024-02-20", "2024-12-31", false),
    ]
}

#[test]
fn favorites_filter_returns_a_subset_of_the_unfiltered_view() {
    let all = derive_view(sample_set(), &ListQuery::default());
    let favorites = derive_view(
        sample_set(),
        &ListQuery {
            only_favorites: true,
            ..ListQuery::default()
        },
    );

    assert_eq!(favorites.len(), 2);
    assert!(favorites.iter().all(|p| all.contains(p)));
    assert!(favorites.iter().all(|p| p.is_favorite));
}

#[test]
fn search_below_three_characters_is_a_passthrough() {
    let no_term = derive_view(sample_set(), &ListQuery::default());
    let short_term = derive_view(
        sample_set(),
        &ListQuery {
            search_term: "ze".to_string(),
            ..ListQuery::default()
        },
    );

    assert_eq!(short_term, no_term);
}

#[test]
fn search_at_three_characters_filters_case_insensitively() {
    let hits = derive_view(
        sample_set(),
        &ListQuery {
            search_term: "ALP".to_string(),
            ..ListQuery::default()
        },
    );

    let names: Vec<&str> = hits.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "alpine"]);
}

#[test]
fn search_with_no_matches_returns_empty() {
    let hits = derive_view(
        sample_set(),
        &ListQuery {
            search_term: "xyz".to_string(),
            ..ListQuery::default()
        },
    );
    assert!(hits.is_empty());
}

#[test]
fn alphabetical_sort_is_ascending_and_case_insensitive() {
    let sorted = derive_view(
        vec![
            project(1, "Zeta", "2024-01-01", "2024-06-01", false),
            project(2, "alpine", "2024-01-01", "2024-06-01", false),
            project(3, "Alpha", "2024-01-01", "2024-06-01", false),
        ],
        &ListQuery {
            sort: SortOrder::Alphabetical,
            ..ListQuery::default()
        },
    );

    let names: Vec<&str> = sorted.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "alpine", "Zeta"]);
}

#[test]
fn recent_sort_puts_latest_start_first() {
    let sorted = derive_view(
        sample_set(),
        &ListQuery {
            sort: SortOrder::Recent,
            ..ListQuery::default()
        },
    );

    let starts: Vec<&str> = sorted.iter().map(|p| p.start_date.as_str()).collect();
    assert_eq!(
        starts,
        vec!["2024-03-01", "2024-02-20", "2024-01-01", "2023-11-15"]
    );
}

#[test]
fn deadline_sort_puts_soonest_end_first() {
    let sorted = derive_view(
        vec![
            project(1, "Later", "2023-01-01", "2024-01-01", false),
            project(2, "Sooner", "2023-01-01", "2023-06-01", false),
        ],
        &ListQuery {
            sort: SortOrder::Deadline,
            ..ListQuery::default()
        },
    );

    let names: Vec<&str> = sorted.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Sooner", "Later"]);
}

#[test]
fn unsorted_keeps_insertion_order() {
    let view = derive_view(sample_set(), &ListQuery::default());
    let ids: Vec<i64> = view.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn sorting_equal_keys_is_stable_on_insertion_order() {
    let sorted = derive_view(
        vec![
            project(1, "Same", "2024-01-01", "2024-06-01", false),
            project(2, "Same", "2024-01-01", "2024-06-01", false),
            project(3, "Same", "2024-01-01", "2024-06-01", false),
        ],
        &ListQuery {
            sort: SortOrder::Alphabetical,
            ..ListQuery::default()
        },
    );

    let ids: Vec<i64> = sorted.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn filters_compose_before_sorting() {
    let view = derive_view(
        sample_set(),
        &ListQuery {
            only_favorites: true,
            search_term: "mad".to_string(),
            sort: SortOrder::Alphabetical,
        },
    );

    assert_eq!(view.len(), 1);
    assert_eq!(view[0].name, "Madeira");
}

#[test]
fn list_query_does_not_mutate_the_persisted_set() {
    let repo = MemoryProjectRepository::new();
    repo.replace_all(&sample_set()).unwrap();
    let service = ProjectService::new(repo.clone());

    let _ = service.list(&ListQuery {
        only_favorites: true,
        search_term: "alp".to_string(),
        sort: SortOrder::Deadline,
    });

    assert_eq!(repo.load(), sample_set());
}
