use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use integration_tests::{
    bananas::{
        BananaBox, BananaError, double_banana_box, encode, parse, quadruple_banana_box, registry,
    },
    init_logging,
};
use splice_core::{Stage, bind, from_fn};
use splice_dynamic::{Bound, ErasedStage, PipelineConfig, Value};

const EXAMPLES: [&str; 4] = [
    "[]",
    r#"{"Bananas": "0"}"#,
    r#"{"Type": "Dwarf Cavendish", "Bananas": 41}"#,
    r#"{"Type": "Grand Nain", "Bananas": 16}"#,
];

/// Renders a result the way a caller printing it would.
fn render<E: std::fmt::Display>(result: Result<Vec<u8>, E>) -> String {
    match result {
        Ok(bytes) => String::from_utf8(bytes).unwrap(),
        Err(error) => error.to_string(),
    }
}

fn dynamic(stages: &[&str]) -> Bound {
    let config = PipelineConfig {
        name: stages.join("-"),
        stages: stages.iter().map(ToString::to_string).collect(),
    };
    registry().assemble(&config).unwrap()
}

#[test]
fn static_pipelines_match_the_packing_table() {
    init_logging();

    let double = double_banana_box();
    let quadruple = quadruple_banana_box();

    let outputs: Vec<String> = EXAMPLES
        .iter()
        .flat_map(|example| {
            [
                render(double.call(example.as_bytes().to_vec())),
                render(quadruple.call(example.as_bytes().to_vec())),
            ]
        })
        .collect();

    assert!(outputs[0].contains("expected a map"), "{}", outputs[0]);
    assert_eq!(outputs[0], outputs[1]);
    assert!(outputs[2].contains("invalid type: string \"0\""), "{}", outputs[2]);
    assert_eq!(outputs[2], outputs[3]);
    assert_eq!(outputs[4], r#"{"Type":"Dwarf Cavendish","Bananas":82}"#);
    assert_eq!(
        outputs[5],
        "Tried to add 82 bananas to a box with 82 bananas already inside it, will go over the limit"
    );
    assert_eq!(outputs[6], r#"{"Type":"Grand Nain","Bananas":32}"#);
    assert_eq!(outputs[7], r#"{"Type":"Grand Nain","Bananas":64}"#);
}

#[test]
fn dynamic_pipelines_agree_with_static_ones() {
    init_logging();

    let double = dynamic(&["parse", "double", "encode"])
        .typed::<(Vec<u8>,), (Vec<u8>,)>()
        .unwrap();
    let quadruple = dynamic(&["parse", "double", "double", "encode"])
        .typed::<(Vec<u8>,), (Vec<u8>,)>()
        .unwrap();

    for example in EXAMPLES {
        let input = example.as_bytes().to_vec();
        assert_eq!(
            render(double.call((input.clone(),)).map(|(bytes,)| bytes)),
            render(double_banana_box().call(input.clone())),
        );
        assert_eq!(
            render(quadruple.call((input.clone(),)).map(|(bytes,)| bytes)),
            render(quadruple_banana_box().call(input)),
        );
    }
}

#[test]
fn errors_reach_the_caller_unchanged() {
    let error = quadruple_banana_box()
        .call(EXAMPLES[2].as_bytes().to_vec())
        .unwrap_err();
    assert!(matches!(
        error,
        BananaError::OverLimit {
            added: 82,
            inside: 82
        }
    ));

    let error = dynamic(&["parse", "double", "double", "encode"])
        .call(vec![Box::new(EXAMPLES[2].as_bytes().to_vec()) as Value])
        .unwrap_err();
    assert!(matches!(
        error.downcast_ref::<BananaError>(),
        Some(BananaError::OverLimit {
            added: 82,
            inside: 82
        })
    ));

    let error = dynamic(&["parse", "double", "encode"])
        .call(vec![Box::new(EXAMPLES[0].as_bytes().to_vec()) as Value])
        .unwrap_err();
    assert!(matches!(
        error.downcast_ref::<BananaError>(),
        Some(BananaError::Json(_))
    ));
}

#[test]
fn failing_double_skips_encoding() {
    let encoded = Arc::new(AtomicUsize::new(0));
    let counting_encode = {
        let encoded = Arc::clone(&encoded);
        move |banana_box: BananaBox| {
            encoded.fetch_add(1, Ordering::SeqCst);
            encode(banana_box)
        }
    };

    let double_double = bind!(
        from_fn(BananaBox::double),
        from_fn(BananaBox::double),
        from_fn(counting_encode.clone()),
    );

    let full = BananaBox {
        r#type: "Grand Nain".into(),
        bananas: 82,
    };
    let (output, error) = double_double.call_or_default(full);

    assert!(output.is_empty());
    assert_eq!(
        error.map(|error| error.to_string()).as_deref(),
        Some("Tried to add 82 bananas to a box with 82 bananas already inside it, will go over the limit")
    );
    assert_eq!(encoded.load(Ordering::SeqCst), 0);

    let erased = splice_dynamic::bind([
        ErasedStage::unary("double", BananaBox::double),
        ErasedStage::unary("encode", counting_encode),
    ])
    .unwrap()
    .typed::<(BananaBox,), (Vec<u8>,)>()
    .unwrap();

    let small = BananaBox {
        r#type: "Lady Finger".into(),
        bananas: 45,
    };
    assert!(erased.call((small.clone(),)).is_ok());
    assert_eq!(encoded.load(Ordering::SeqCst), 1);

    let big = BananaBox {
        bananas: 46,
        ..small
    };
    assert!(erased.call((big,)).is_err());
    assert_eq!(encoded.load(Ordering::SeqCst), 1);
}

#[test]
fn huge_counts_fail_instead_of_overflowing() {
    let result = double_banana_box().call(br#"{"Type":"x","Bananas":9223372036854775807}"#.to_vec());

    assert!(matches!(
        result,
        Err(BananaError::OverLimit {
            added: i64::MAX,
            inside: i64::MAX
        })
    ));

    let doubled = dynamic(&["parse", "double", "encode"])
        .typed::<(Vec<u8>,), (Vec<u8>,)>()
        .unwrap()
        .call((br#"{"Bananas":9223372036854775807}"#.to_vec(),));
    assert!(doubled.is_err());
}

#[test]
fn missing_fields_read_as_empty() {
    assert_eq!(
        parse(br#"{"Bananas": 5}"#.to_vec()).unwrap(),
        BananaBox {
            r#type: String::new(),
            bananas: 5,
        }
    );
    assert_eq!(parse(b"{}".to_vec()).unwrap(), BananaBox::default());

    let output = double_banana_box()
        .call(br#"{"Type": "Pisang Raja"}"#.to_vec())
        .unwrap();
    assert_eq!(output, br#"{"Type":"Pisang Raja","Bananas":0}"#);
}

#[test]
fn scenario_from_record_to_text() {
    let pipeline = bind(bind(from_fn(parse), from_fn(BananaBox::double)), from_fn(encode));

    let output = pipeline
        .call(br#"{"Type": "Cavendish", "Bananas": 41}"#.to_vec())
        .unwrap();
    let record: BananaBox = serde_json::from_slice(&output).unwrap();

    assert_eq!(record.bananas, 82);
    assert_eq!(record.r#type, "Cavendish");
}

#[test]
fn pipelines_can_be_shared_across_threads() {
    let double = double_banana_box();

    std::thread::scope(|scope| {
        for bananas in [0, 10, 45, 46] {
            let double = double.clone();
            scope.spawn(move || {
                let input = format!(r#"{{"Type": "Manzano", "Bananas": {bananas}}}"#);
                let result = double.call(input.into_bytes());
                assert_eq!(result.is_ok(), bananas <= 45);
            });
        }
    });
}
