use bioc_core::{
    reconstruct_text, slice_chars, validate_document, Annotation, AnnotationScope, Document,
    FailureKind, Node, Passage, Relation, Sentence, TextContainer, ValidationConfig, Validator,
};
use proptest::prelude::*;

fn annotation(id: &str, offset: i64, length: i64, text: &str) -> Annotation {
    Annotation::builder()
        .id(id)
        .span(offset, length)
        .text(text)
        .build()
        .unwrap()
}

fn document_with_passage(passage: Passage) -> Document {
    let mut document = Document::new("d1");
    document.add_passage(passage);
    document
}

// "Active Raf-1 phosphorylates MEK1." with sentence-level annotations.
fn well_formed_document() -> Document {
    let mut sentence = Sentence::with_text(0, "Active Raf-1 phosphorylates MEK1.");
    sentence.add_annotation(annotation("T1", 7, 5, "Raf-1"));
    sentence.add_annotation(annotation("T2", 28, 4, "MEK1"));
    sentence.add_relation(
        Relation::new("R1")
            .unwrap()
            .with_node("T1", "agent")
            .with_node("T2", "theme"),
    );

    let mut passage = Passage::new(0);
    passage.add_sentence(sentence);
    passage.add_annotation(annotation("P1", 7, 5, "Raf-1"));

    let mut document = document_with_passage(passage);
    document.add_annotation(annotation("D1", 28, 4, "MEK1"));
    document
}

#[test]
fn well_formed_document_passes() {
    assert_eq!(validate_document(&well_formed_document()), Ok(()));
}

#[test]
fn mismatched_text_is_reported_with_expected_and_actual() {
    let mut passage = Passage::with_text(0, "0123456789right tail");
    passage.add_annotation(annotation("T7", 10, 5, "wrong"));
    let document = document_with_passage(passage);

    let failures = validate_document(&document).unwrap_err();
    assert_eq!(failures.len(), 1);
    let failure = &failures[0];
    assert_eq!(failure.kind, FailureKind::TextMismatch);
    assert_eq!(failure.entity_id, "T7");
    assert_eq!(failure.expected.as_deref(), Some("right"));
    assert_eq!(failure.actual.as_deref(), Some("wrong"));
    assert_eq!(failure.location_path, "document[d1]/passage[0]");
}

#[test]
fn dangling_reference_names_missing_id() {
    let mut passage = Passage::with_text(0, "Raf-1 binds");
    passage.add_annotation(annotation("T1", 0, 5, "Raf-1"));
    passage.add_relation(
        Relation::new("R1")
            .unwrap()
            .with_node("T1", "agent")
            .with_node("X", "theme"),
    );
    let document = document_with_passage(passage);

    let failures = validate_document(&document).unwrap_err();
    assert_eq!(failures.len(), 1);
    let failure = &failures[0];
    assert_eq!(failure.kind, FailureKind::DanglingReference);
    assert_eq!(failure.entity_id, "R1");
    assert_eq!(failure.expected.as_deref(), Some("X"));
    assert_eq!(failure.node, Some(Node::new("X", "theme")));
    assert!(failure.to_string().contains("\"X\""));
}

#[test]
fn relation_may_reference_relation_in_same_container() {
    let mut passage = Passage::with_text(0, "Raf-1 binds MEK1");
    passage.add_annotation(annotation("T1", 0, 5, "Raf-1"));
    passage.add_annotation(annotation("T2", 12, 4, "MEK1"));
    passage.add_relation(
        Relation::new("R1")
            .unwrap()
            .with_node("T1", "agent")
            .with_node("T2", "theme"),
    );
    passage.add_relation(Relation::new("R2").unwrap().with_node("R1", "cause"));

    assert_eq!(validate_document(&document_with_passage(passage)), Ok(()));
}

#[test]
fn references_do_not_resolve_across_levels() {
    let mut sentence = Sentence::with_text(0, "Raf-1");
    sentence.add_relation(Relation::new("R1").unwrap().with_node("P1", "agent"));
    let mut passage = Passage::new(0);
    passage.add_sentence(sentence);
    passage.add_annotation(annotation("P1", 0, 5, "Raf-1"));

    let failures = validate_document(&document_with_passage(passage)).unwrap_err();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].kind, FailureKind::DanglingReference);
    assert_eq!(failures[0].location_path, "document[d1]/passage[0]/sentence[0]");
}

#[test]
fn multi_span_annotation_matches_concatenated_slices() {
    let mut passage = Passage::with_text(0, "AB........CD");
    passage.add_annotation(
        Annotation::builder()
            .id("T1")
            .span(0, 2)
            .span(10, 2)
            .text("ABCD")
            .build()
            .unwrap(),
    );

    assert_eq!(validate_document(&document_with_passage(passage)), Ok(()));
}

#[test]
fn multi_span_slices_are_joined_in_ascending_offset_order() {
    let mut passage = Passage::with_text(0, "AB........CD");
    passage.add_annotation(
        Annotation::builder()
            .id("T1")
            .span(10, 2)
            .span(0, 2)
            .text("ABCD")
            .build()
            .unwrap(),
    );

    assert_eq!(validate_document(&document_with_passage(passage)), Ok(()));
}

#[test]
fn sentence_offsets_are_translated_to_local_indices() {
    let mut sentence = Sentence::with_text(40, "ERK1 and ERK2");
    sentence.add_annotation(annotation("T1", 49, 4, "ERK2"));
    let mut passage = Passage::new(40);
    passage.add_sentence(sentence);

    assert_eq!(validate_document(&document_with_passage(passage)), Ok(()));
}

#[test]
fn reconstructed_passage_text_is_used_for_annotations() {
    let mut passage = Passage::new(0);
    passage.add_sentence(Sentence::with_text(0, "AB"));
    passage.add_sentence(Sentence::with_text(5, "CD"));
    passage.add_annotation(annotation("T1", 5, 2, "CD"));

    assert_eq!(validate_document(&document_with_passage(passage)), Ok(()));
}

#[test]
fn missing_passage_text_is_reported_once_and_walk_continues() {
    let mut passage = Passage::new(0);
    passage.add_annotation(annotation("T1", 0, 2, "AB"));
    passage.add_relation(Relation::new("R1").unwrap().with_node("Z", "theme"));
    let document = document_with_passage(passage);

    let failures = validate_document(&document).unwrap_err();
    let kinds: Vec<FailureKind> = failures.iter().map(|failure| failure.kind).collect();
    assert_eq!(
        kinds,
        vec![FailureKind::MissingText, FailureKind::DanglingReference]
    );
    assert_eq!(failures[0].entity_id, "document[d1]/passage[0]");
    assert_eq!(failures[0].location_path, "document[d1]/passage[0]");
}

#[test]
fn missing_text_found_from_document_names_the_same_container_path() {
    let mut document = document_with_passage(Passage::new(0));
    document.add_annotation(annotation("D1", 0, 2, "AB"));

    let failures = validate_document(&document).unwrap_err();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].kind, FailureKind::MissingText);
    assert_eq!(failures[0].entity_id, "document[d1]/passage[0]");
    assert_eq!(failures[0].location_path, "document[d1]");
}

#[test]
fn containers_without_recorded_text_need_no_text() {
    let mut passage = Passage::new(0);
    passage.add_annotation(Annotation::builder().id("T1").span(0, 2).build().unwrap());

    assert_eq!(validate_document(&document_with_passage(passage)), Ok(()));
}

#[test]
fn location_past_end_of_text_is_a_mismatch() {
    let mut passage = Passage::with_text(0, "short");
    passage.add_annotation(annotation("T1", 3, 10, "rt"));

    let failures = validate_document(&document_with_passage(passage)).unwrap_err();
    assert_eq!(failures[0].kind, FailureKind::TextMismatch);
    assert_eq!(failures[0].expected, None);
}

fn document_with_three_failures() -> Document {
    let mut sentence = Sentence::with_text(0, "abc");
    sentence.add_annotation(annotation("S1", 0, 3, "xyz"));
    let mut passage = Passage::new(0);
    passage.add_sentence(sentence);
    passage.add_annotation(annotation("P1", 0, 3, "qqq"));

    let mut document = document_with_passage(passage);
    document.add_relation(Relation::new("D-R1").unwrap().with_node("nope", "arg"));
    document
}

#[test]
fn collect_all_reports_failures_in_traversal_order() {
    let failures = Validator::new(ValidationConfig::collect_all())
        .validate_document(&document_with_three_failures())
        .unwrap_err();
    let ids: Vec<&str> = failures
        .iter()
        .map(|failure| failure.entity_id.as_str())
        .collect();
    assert_eq!(ids, vec!["D-R1", "P1", "S1"]);
}

#[test]
fn fail_fast_stops_at_first_failure() {
    let failures = Validator::new(ValidationConfig::fail_fast())
        .validate_document(&document_with_three_failures())
        .unwrap_err();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].entity_id, "D-R1");
}

#[test]
fn validation_is_idempotent() {
    let document = document_with_three_failures();
    let validator = Validator::default();
    let first = validator.validate_document(&document);
    let second = validator.validate_document(&document);
    assert_eq!(first, second);
}

// Re-slices every annotation from its own container's rebuilt text.
fn assert_round_trip<C>(container: &C)
where
    C: TextContainer + AnnotationScope,
{
    let text = reconstruct_text(container).unwrap();
    let base = container.base_offset();
    for annotation in container.annotations() {
        let Some(recorded) = annotation.text() else {
            continue;
        };
        let addressed: String = annotation
            .sorted_locations()
            .iter()
            .map(|location| {
                slice_chars(&text, location.offset() - base, location.end() - base).unwrap()
            })
            .collect();
        assert_eq!(addressed, recorded, "annotation {}", annotation.id());
    }
}

fn assert_document_round_trips(document: &Document) {
    assert_round_trip(document);
    for passage in document.iter_passages() {
        assert_round_trip(passage);
        for sentence in &passage.sentences {
            assert_round_trip(sentence);
        }
    }
}

fn multi_span(id: &str, spans: &[(usize, usize)], text: &str) -> Annotation {
    let mut builder = Annotation::builder().id(id).text(text);
    for (offset, length) in spans {
        builder = builder.span(*offset as i64, *length as i64);
    }
    builder.build().unwrap()
}

// Passage at 10: "Raf-1 binds\n\n\nMEK1." rebuilt from two sentences.
fn gapped_document() -> Document {
    let mut first = Sentence::with_text(10, "Raf-1 binds");
    first.add_annotation(annotation("S1", 16, 5, "binds"));
    let mut second = Sentence::with_text(24, "MEK1.");
    second.add_annotation(annotation("S2", 24, 4, "MEK1"));

    let mut passage = Passage::new(10);
    passage.add_sentence(first);
    passage.add_sentence(second);
    passage.add_annotation(multi_span("P1", &[(24, 4), (10, 5)], "Raf-1MEK1"));
    passage.add_annotation(annotation("P2", 19, 7, "ds\n\n\nME"));

    let mut document = document_with_passage(passage);
    document.add_annotation(multi_span("D1", &[(24, 4), (9, 2)], "\nRMEK1"));
    document
}

#[test]
fn valid_annotations_round_trip_through_reconstructed_text() {
    for document in [well_formed_document(), gapped_document()] {
        assert_eq!(validate_document(&document), Ok(()));
        assert_document_round_trips(&document);
    }
}

proptest! {
    // Annotations cut from the rebuilt text at every level validate cleanly.
    #[test]
    fn annotations_cut_from_rebuilt_text_validate(
        base in 1usize..40,
        pieces in prop::collection::vec(("[a-z]{1,6}", 0usize..4), 1..6),
    ) {
        let mut passage = Passage::new(base);
        let mut offset = base;
        let mut spans = Vec::new();
        for (index, (text, gap)) in pieces.iter().enumerate() {
            offset += gap;
            let length = text.chars().count();
            let mut sentence = Sentence::with_text(offset, text.clone());
            sentence.add_annotation(annotation(&format!("S{index}"), offset as i64, 1, &text[..1]));
            passage.add_sentence(sentence);
            spans.push((offset, length));
            offset += length;
        }

        let passage_text = reconstruct_text(&passage).unwrap().into_owned();
        let first_offset = spans[0].0;
        let covering = slice_chars(&passage_text, first_offset - base, offset - base).unwrap();
        passage.add_annotation(annotation(
            "P1",
            first_offset as i64,
            (offset - first_offset) as i64,
            covering,
        ));
        let joined: String = pieces.iter().map(|(text, _)| text.as_str()).collect();
        let reversed: Vec<(usize, usize)> = spans.iter().rev().copied().collect();
        passage.add_annotation(multi_span("P2", &reversed, &joined));

        let (last_offset, last_length) = spans[spans.len() - 1];
        let last_text = &pieces[pieces.len() - 1].0;
        let mut document = document_with_passage(passage);
        document.add_annotation(multi_span(
            "D1",
            &[(last_offset, last_length), (base - 1, 1)],
            &format!("\n{last_text}"),
        ));

        prop_assert_eq!(validate_document(&document), Ok(()));
        assert_document_round_trips(&document);
    }
}
