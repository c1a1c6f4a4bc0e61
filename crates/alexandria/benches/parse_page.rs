use alexandria::Page;
use alexandria::model::{Author, Work};

fn work_json(i: usize) -> String {
    format!(
        r#"{{"id": "https://openalex.org/W{i}", "doi": "https://doi.org/10.1234/w{i}",
        "display_name": "Work {i}", "publication_year": 2020, "type": "article",
        "cited_by_count": {i}, "open_access": {{"is_oa": true, "oa_status": "gold"}},
        "authorships": [{{"author_position": "first",
            "author": {{"id": "https://openalex.org/A{i}", "display_name": "Author {i}"}},
            "institutions": [{{"id": "https://openalex.org/I1", "display_name": "Uni", "country_code": "NL"}}]}}],
        "abstract_inverted_index": {{"Coral": [0], "reefs": [1], "are": [2], "declining": [3]}},
        "referenced_works": ["https://openalex.org/W1", "https://openalex.org/W2"],
        "counts_by_year": [{{"year": 2024, "cited_by_count": 3}}]}}"#
    )
}

fn author_json(i: usize) -> String {
    format!(
        r#"{{"id": "https://openalex.org/A{i}", "orcid": "https://orcid.org/0000-0000-0000-{i:04}",
        "display_name": "Author {i}", "works_count": 10, "cited_by_count": 100,
        "summary_stats": {{"h_index": 5, "i10_index": 3, "2yr_mean_citedness": 1.2}},
        "last_known_institutions": [{{"id": "https://openalex.org/I1", "display_name": "Uni"}}]}}"#
    )
}

fn page_json(records: Vec<String>) -> String {
    format!(
        r#"{{"meta": {{"count": 100000, "db_response_time_ms": 40, "page": 1, "per_page": 200}},
        "results": [{}], "group_by": []}}"#,
        records.join(",")
    )
}

#[divan::bench]
fn decode_works_page(bencher: divan::Bencher) {
    let body = page_json((0..200).map(work_json).collect());
    bencher.bench(|| Page::<Work>::from_json(&body, false).unwrap());
}

#[divan::bench]
fn decode_authors_page(bencher: divan::Bencher) {
    let body = page_json((0..200).map(author_json).collect());
    bencher.bench(|| Page::<Author>::from_json(&body, false).unwrap());
}

#[divan::bench]
fn rebuild_abstracts(bencher: divan::Bencher) {
    let body = page_json((0..200).map(work_json).collect());
    let page = Page::<Work>::from_json(&body, false).unwrap();
    bencher.bench(|| {
        page.results
            .iter()
            .filter_map(|w| w.abstract_text())
            .map(|s| s.len())
            .sum::<usize>()
    });
}

fn main() {
    divan::main();
}
