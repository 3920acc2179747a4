//! End-to-end splitting scenarios through the public API

use std::collections::HashSet;
use threadsplit_core::{
    grapheme_len, split, split_with_config, ByteSpan, GraphemeScanner, LinkDetector, Platform,
    ReplyRef, SplitConfig, SplitError, SpanDetector, ThreadSplitter,
};

const LINK_TEXT: &str = "see https://example.com/a/very/long/path/indeed for more";

fn cut_offsets(
    splitter: &ThreadSplitter<LinkDetector>,
    text: &str,
    limit: usize,
    marker: &str,
) -> Vec<usize> {
    let thread = splitter.split(text, limit, marker).unwrap();
    thread.parts().iter().map(|part| part.span.end).collect()
}

#[test]
fn test_link_protection_when_hard_cut_falls_inside_url() {
    // Budget 20: the hard cut would land inside the URL, which starts at byte 4.
    let parts = split(LINK_TEXT, 23, "...").unwrap();
    assert_eq!(parts[0], "see ...");
    assert!(parts[1].starts_with("https://"));
}

#[test]
fn test_link_protection_across_limits() {
    let link = LinkDetector::new().unwrap().find_spans(LINK_TEXT)[0];
    assert_eq!(link, ByteSpan::new(4, 47));

    let splitter = ThreadSplitter::with_links().unwrap();
    for limit in 8..=60 {
        let mut previous = 0;
        for cut in cut_offsets(&splitter, LINK_TEXT, limit, "...") {
            if link.splits_at(cut) {
                assert!(
                    previous >= link.start,
                    "limit {limit}: cut at {cut} inside a link that began in the part"
                );
            }
            previous = cut;
        }
    }
}

#[test]
fn test_link_fitting_the_budget_stays_whole() {
    let parts = split(LINK_TEXT, 50, "...").unwrap();
    assert_eq!(
        parts,
        vec!["see https://example.com/a/very/long/path/indeed...", " for more"]
    );
}

#[test]
fn test_multi_code_point_clusters_are_never_split() {
    let text = "abcd🇯🇵🇯🇵🇯🇵e\u{301}e\u{301}e\u{301}👨‍👩‍👧xyz";
    let boundaries: HashSet<usize> = GraphemeScanner::new(text)
        .map(|cluster| cluster.span.end)
        .collect();

    let splitter = ThreadSplitter::with_links().unwrap();
    for limit in 1..=12 {
        let thread = splitter.split(text, limit, "").unwrap();
        for part in thread.parts() {
            assert!(boundaries.contains(&part.span.end), "limit {limit}");
            assert!(grapheme_len(&part.text) <= limit, "limit {limit}");
        }
    }
}

#[test]
fn test_non_ascii_host_is_protected() {
    let text = "We met at the café.com pop-up yesterday.";
    assert_eq!(split(text, 300, "...").unwrap(), vec![text]);

    // Budget 16: a hard cut would land inside "café.com", which starts at byte 14.
    let parts = split(text, 19, "...").unwrap();
    assert_eq!(parts[0], "We met at the ...");
    assert!(parts[1].starts_with("café.com"));
}

#[test]
fn test_sentence_boundary_beats_hard_cut() {
    let text = format!("{}. {}", "a".repeat(26), "B".repeat(20));
    let parts = split(&text, 33, "...").unwrap();

    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0], format!("{}. ...", "a".repeat(26)));
    assert_eq!(parts[1], "B".repeat(20));
}

#[test]
fn test_early_sentence_boundary_falls_back_to_hard_cut() {
    let text = format!("{}. {}", "a".repeat(10), "B".repeat(30));
    let parts = split(&text, 33, "...").unwrap();

    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0], format!("{}. {}...", "a".repeat(10), "B".repeat(18)));
    assert_eq!(parts[1], "B".repeat(12));
}

#[test]
fn test_degenerate_limits_are_rejected() {
    for limit in 0..=3 {
        let err = split("anything at all", limit, "...").unwrap_err();
        assert!(matches!(err, SplitError::InvalidLimit { marker_len: 3, .. }));
    }
    assert!(split("anything at all", 4, "...").is_ok());
}

#[test]
fn test_platform_presets_bound_every_part() {
    let text = "Threads are long. ".repeat(80);

    for platform in Platform::ALL {
        let config = SplitConfig::for_platform(platform);
        let thread = split_with_config(&text, &config).unwrap();

        assert!(thread.len() > 1);
        for part in &thread {
            assert!(grapheme_len(&part.text) <= platform.limit());
        }
        let rebuilt: String = thread.parts().iter().map(|p| p.content(&text)).collect();
        assert_eq!(rebuilt, text);
    }
}

#[test]
fn test_reply_chain_for_split_thread() {
    let thread = ThreadSplitter::with_links()
        .unwrap()
        .split("aaaa bbbb cccc", 6, "…")
        .unwrap();
    assert_eq!(thread.len(), 3);

    let refs: Vec<ReplyRef> = thread.reply_refs().collect();
    assert_eq!(
        refs,
        vec![
            ReplyRef { index: 1, parent: 0, root: 0 },
            ReplyRef { index: 2, parent: 1, root: 0 },
        ]
    );
}

#[test]
fn test_thread_serializes_to_json() {
    let thread = ThreadSplitter::with_links()
        .unwrap()
        .split("One. Two. Three.", 8, "...")
        .unwrap();
    let value = serde_json::to_value(&thread).unwrap();

    assert_eq!(value["end_marker"], "...");
    assert_eq!(value["parts"][0]["span"]["start"], 0);
    assert_eq!(value["parts"].as_array().unwrap().len(), thread.len());
    assert_eq!(value["parts"][thread.len() - 1]["is_final"], true);
}
