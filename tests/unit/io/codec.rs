//! Tests for the versioned JSON document codec

#[cfg(test)]
mod tests {
    use gridsynth::io::preset::demo_synthesizer;
    use gridsynth::{
        AlgorithmError, ErrorKind, Grid, RuleBased, Symbol, Synthesizer, Transformation,
        TransformationKind, WILDCARD_ID,
    };
    use serde_json::{Value, json};

    fn sample() -> Synthesizer {
        let mut synthesizer = Synthesizer::new(3, 2, 0).unwrap();
        synthesizer.grid_mut().set(2, 1, 5).unwrap();
        synthesizer.alphabet_mut().add_symbol(Symbol::new(2, "G"));
        synthesizer.alphabet_mut().add_symbol(Symbol::new(1, "F"));

        let mut noise = Transformation::random("Noise");
        noise.enabled = false;
        synthesizer.add_transformation(noise);

        let rule = RuleBased::new(Grid::from_rows(&[[WILDCARD_ID, 1]]).unwrap())
            .with_replacement(0.25, Grid::from_rows(&[[2, 2]]).unwrap())
            .with_replacement(0.5, Grid::from_rows(&[[WILDCARD_ID], [1]]).unwrap());
        synthesizer.add_transformation(Transformation::rule_based("Rule", rule));
        synthesizer
    }

    fn minimal_document() -> Value {
        json!({
            "version": 1,
            "grid": {"width": 2, "height": 2, "data": [0, 1, 2, 0]},
            "alphabet": {"symbols": [{"id": 1, "name": "F"}]},
            "transformations": []
        })
    }

    // Tests a full configuration survives serialization unchanged
    #[test]
    fn test_round_trip_preserves_configuration() {
        let original = sample();
        let restored = Synthesizer::from_json(&original.to_json().unwrap()).unwrap();

        assert_eq!(restored, original);
    }

    // Tests the demo preset round-trips as well
    #[test]
    fn test_round_trip_demo_preset() {
        let original = demo_synthesizer().unwrap();
        let restored = Synthesizer::from_json(&original.to_json().unwrap()).unwrap();

        assert_eq!(restored, original);
    }

    // Tests the written document layout field by field
    #[test]
    fn test_document_layout() {
        let value: Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();

        assert_eq!(value["version"], json!(1));
        assert_eq!(
            value["grid"],
            json!({"width": 3, "height": 2, "data": [0, 0, 0, 0, 0, 5]})
        );
        assert_eq!(
            value["alphabet"]["symbols"],
            json!([{"id": 1, "name": "F"}, {"id": 2, "name": "G"}])
        );

        let transformations = value["transformations"].as_array().unwrap();
        assert_eq!(transformations.len(), 2);
        assert_eq!(transformations[0]["type"], json!("random"));
        assert_eq!(transformations[0]["enabled"], json!(false));
        assert!(transformations[0].get("search").is_none());

        let rule = &transformations[1];
        assert_eq!(rule["type"], json!("rule_based"));
        assert_eq!(rule["name"], json!("Rule"));
        assert_eq!(rule["search"], json!({"width": 2, "height": 1, "data": [-1, 1]}));
        assert_eq!(rule["replacements"][0]["probability"], json!(0.25));
        assert_eq!(
            rule["replacements"][1]["grid"],
            json!({"width": 1, "height": 2, "data": [-1, 1]})
        );
    }

    // Tests documents from a newer format are refused
    #[test]
    fn test_unsupported_version() {
        let mut document = minimal_document();
        document["version"] = json!(2);

        let err = Synthesizer::from_json(&document.to_string()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(matches!(err, AlgorithmError::UnsupportedVersion { found: 2 }));
    }

    // Tests a non-integer version is a format error
    #[test]
    fn test_non_integer_version() {
        let mut document = minimal_document();
        document["version"] = json!("1");

        let err = Synthesizer::from_json(&document.to_string()).unwrap_err();

        assert!(matches!(err, AlgorithmError::InvalidDocument { .. }));
    }

    // Tests a float version is not read as an integer even when it is whole
    #[test]
    fn test_float_version_is_rejected() {
        let mut document = minimal_document();
        document["version"] = json!(1.0);

        let err = Synthesizer::from_json(&document.to_string()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(matches!(err, AlgorithmError::InvalidDocument { .. }));
    }

    // Tests grid sizes whose cell count overflows are a format error
    #[test]
    fn test_overflowing_grid_size() {
        let mut document = minimal_document();
        document["grid"] = json!({"width": 4_294_967_296_u64, "height": 4_294_967_296_u64, "data": []});

        let err = Synthesizer::from_json(&document.to_string()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(matches!(err, AlgorithmError::InvalidDocument { .. }));
    }

    // Tests probabilities JSON cannot represent are refused instead of written as null
    #[test]
    fn test_non_finite_probability_is_not_written() {
        for probability in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN] {
            let mut synthesizer = sample();
            let rule = RuleBased::new(Grid::from_rows(&[[1]]).unwrap())
                .with_replacement(probability, Grid::from_rows(&[[2]]).unwrap());
            synthesizer.add_transformation(Transformation::rule_based("Bad", rule));

            let err = synthesizer.to_json().unwrap_err();

            assert!(matches!(err, AlgorithmError::InvalidDocument { .. }));
            assert!(
                err.to_string()
                    .contains("transformations[2].replacements[0].probability"),
                "{err}"
            );
        }
    }

    // Tests documents without a version are read as the current format
    #[test]
    fn test_missing_version_is_accepted() {
        let mut document = minimal_document();
        document.as_object_mut().unwrap().remove("version");

        let synthesizer = Synthesizer::from_json(&document.to_string()).unwrap();

        assert_eq!(synthesizer.grid().to_vec(), vec![0, 1, 2, 0]);
        assert_eq!(synthesizer.alphabet().name_of(1), Some("F"));
    }

    // Tests missing and mistyped fields are reported as unparsable
    #[test]
    fn test_missing_or_mistyped_fields() {
        let mut missing = minimal_document();
        missing.as_object_mut().unwrap().remove("alphabet");
        let err = Synthesizer::from_json(&missing.to_string()).unwrap_err();
        assert!(matches!(err, AlgorithmError::MalformedDocument { .. }));

        let mut mistyped = minimal_document();
        mistyped["grid"]["width"] = json!("two");
        let err = Synthesizer::from_json(&mistyped.to_string()).unwrap_err();
        assert!(matches!(err, AlgorithmError::MalformedDocument { .. }));

        let err = Synthesizer::from_json("{ not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    // Tests unknown transformation types are rejected
    #[test]
    fn test_unknown_transformation_type() {
        let mut document = minimal_document();
        document["transformations"] = json!([{"name": "X", "enabled": true, "type": "erode"}]);

        let err = Synthesizer::from_json(&document.to_string()).unwrap_err();

        assert!(matches!(err, AlgorithmError::MalformedDocument { .. }));
    }

    // Tests grid data length must match the declared dimensions
    #[test]
    fn test_data_length_mismatch() {
        let mut short = minimal_document();
        short["grid"]["data"] = json!([0, 1, 2]);
        let err = Synthesizer::from_json(&short.to_string()).unwrap_err();
        assert!(matches!(err, AlgorithmError::InvalidDocument { .. }));

        let mut document = minimal_document();
        document["transformations"] = json!([{
            "name": "R",
            "enabled": true,
            "type": "rule_based",
            "search": {"width": 1, "height": 1, "data": [1]},
            "replacements": [{"probability": 1.0, "grid": {"width": 2, "height": 1, "data": [1]}}]
        }]);
        let err = Synthesizer::from_json(&document.to_string()).unwrap_err();
        assert!(
            err.to_string().contains("transformations[0].replacements[0].grid"),
            "{err}"
        );
    }

    // Tests zero-sized grids in a document are rejected
    #[test]
    fn test_zero_dimension_grid() {
        let mut document = minimal_document();
        document["grid"] = json!({"width": 0, "height": 2, "data": []});

        let err = Synthesizer::from_json(&document.to_string()).unwrap_err();

        assert!(matches!(err, AlgorithmError::InvalidDocument { .. }));
    }

    // Tests duplicate symbol ids keep the first registration
    #[test]
    fn test_duplicate_symbol_ids_keep_first() {
        let mut document = minimal_document();
        document["alphabet"]["symbols"] = json!([
            {"id": 1, "name": "First"},
            {"id": 1, "name": "Second"},
            {"id": 3, "name": "Third"}
        ]);

        let synthesizer = Synthesizer::from_json(&document.to_string()).unwrap();

        assert_eq!(synthesizer.alphabet().len(), 2);
        assert_eq!(synthesizer.alphabet().name_of(1), Some("First"));
    }

    // Tests transformations are rebuilt in document order with the right variant
    #[test]
    fn test_transformation_dispatch() {
        let mut document = minimal_document();
        document["transformations"] = json!([
            {
                "name": "Rule",
                "enabled": true,
                "type": "rule_based",
                "search": {"width": 1, "height": 1, "data": [-1]},
                "replacements": []
            },
            {"name": "Noise", "enabled": false, "type": "random"}
        ]);

        let synthesizer = Synthesizer::from_json(&document.to_string()).unwrap();
        let transformations = synthesizer.transformations();

        assert_eq!(transformations.len(), 2);
        assert!(matches!(
            transformations[0].kind,
            TransformationKind::RuleBased(_)
        ));
        assert!(transformations[0].enabled);
        assert_eq!(transformations[1].kind, TransformationKind::Random);
        assert_eq!(transformations[1].name, "Noise");
        assert!(!transformations[1].enabled);
    }
}
