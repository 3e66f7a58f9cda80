use fourtrack::config::AppConfig;
use fourtrack::engines::analysis::SequenceAnalyzer;
use fourtrack::engines::encoding::{remap, PairCodec, Track};
use fourtrack::data::SequenceValidator;
use fourtrack::{Alphabet, FourTrackError};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn analyzer(trials: usize) -> SequenceAnalyzer {
    let mut config = AppConfig::default();
    config.null_model.trials = trials;
    SequenceAnalyzer::new(&config).unwrap()
}

#[test]
fn test_half_gc_44bp_preview() {
    let input = "ATCG".repeat(11);
    let report = analyzer(100)
        .analyze("atcg-44", &input, Alphabet::Dna, &mut StdRng::seed_from_u64(1))
        .unwrap();

    assert_eq!(report.metadata.length, 44);
    assert_eq!(report.gc_content(), Some(0.5));
    assert_eq!(&report.code_preview[..6], &[3, 5, 3, 5, 3, 5]);
    assert_eq!(
        report.label_preview[..4].to_vec(),
        vec!["C", "D", "C", "D"]
    );
}

#[test]
fn test_full_gc_43bp_reports_exactly_100_percent() {
    let input: String = "GC".repeat(21) + "G";
    assert_eq!(input.len(), 43);

    let report = analyzer(50)
        .analyze("gc-43", &input, Alphabet::Dna, &mut StdRng::seed_from_u64(2))
        .unwrap();

    let composition = report.base_composition.unwrap();
    assert_eq!(composition.gc_content, 1.0);
    assert_eq!(format!("{:.2}%", composition.gc_percent()), "100.00%");
    assert!(report.metadata.truncated);
    assert_eq!(report.metadata.processed_length, 42);
}

#[test]
fn test_invalid_symbol_names_character_and_allowed_set() {
    let err = SequenceValidator::validate("ACGTX", Alphabet::Dna).unwrap_err();
    assert!(matches!(err, FourTrackError::InvalidSymbol { symbol: 'X', .. }));
    let message = err.to_string();
    assert!(message.contains("'X'"));
    assert!(message.contains("A, C, G, T"));
}

#[test]
fn test_digits_with_leading_three_point() {
    let with_point = SequenceValidator::validate("3.14159", Alphabet::Digits).unwrap();
    let without = SequenceValidator::validate("314159", Alphabet::Digits).unwrap();
    assert_eq!(with_point, without);
}

#[test]
fn test_remap_matches_codec() {
    let seq = SequenceValidator::validate("GGCCAATTACGT", Alphabet::Dna).unwrap();
    let codes = PairCodec::encode(&seq).codes;
    for track in Track::all() {
        let labels = remap(&seq, track);
        assert_eq!(labels.len(), codes.len());
        for (label, code) in labels.iter().zip(&codes) {
            assert_eq!(Some(*label), track.label(*code));
        }
    }
}

#[test]
fn test_empty_sequence_has_degenerate_statistics() {
    let report = analyzer(20)
        .analyze("empty", "", Alphabet::Dna, &mut StdRng::seed_from_u64(3))
        .unwrap();

    assert_eq!(report.metadata.code_length, 0);
    assert_eq!(report.gc_content(), Some(0.0));
    assert_eq!(report.code_distribution.entropy, 0.0);
    for t in &report.four_track.tracks {
        assert_eq!(t.forward.entropy, 0.0);
        assert_eq!(t.forward.composition.ratio, 0.0);
        assert_eq!(t.forward.pair_ratio(), 0.0);
    }
}

#[test]
fn test_decode_reproduces_processed_bases() {
    let seq = SequenceValidator::validate("tgcaTTGGCCA", Alphabet::Dna).unwrap();
    let encoded = PairCodec::encode(&seq);
    assert_eq!(PairCodec::decode(&encoded).unwrap(), "TGCATTGGCC");
}
