use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};

use masquerade_engine::{
    Anonymizable, AnonymizeError, AnonymizeOptions, Anonymizer, Markers, NumberDomain, NumberSpec,
    Registry, Schema, StringDomain, StringSpec,
};
use regex::Regex;

#[derive(Debug, Clone, Default, PartialEq)]
struct Customer {
    login: Option<String>,
    email: Option<String>,
    age: i32,
    nickname: Option<String>,
    aliases: Vec<String>,
    finalized: u32,
}

impl Anonymizable for Customer {
    fn schema() -> Schema<Self> {
        Schema::<Customer>::builder("Customer")
            .scalar(
                "login",
                StringSpec::new(StringDomain::String).length(5, 5),
                |customer| customer.login.as_ref(),
                |customer, value| customer.login = Some(value),
            )
            .scalar(
                "email",
                StringSpec::new(StringDomain::Email),
                |customer| customer.email.as_ref(),
                |customer, value| customer.email = Some(value),
            )
            .scalar(
                "age",
                NumberSpec::new(NumberDomain::Integer).range(18, 65),
                |customer| Some(&customer.age),
                |customer, value| customer.age = value,
            )
            .scalar(
                "nickname",
                StringSpec::new(StringDomain::String),
                |customer| customer.nickname.as_ref(),
                |customer, value| customer.nickname = Some(value),
            )
            .collection(
                "aliases",
                StringSpec::new(StringDomain::String).repeat(2, 4),
                |customer| Some(&customer.aliases),
                |customer| Some(&mut customer.aliases),
            )
            .hook("finalize_self", |customer| customer.finalized += 1)
            .build()
    }
}

fn customer() -> Customer {
    Customer {
        login: Some("jdoe".to_string()),
        email: Some("a@a.com".to_string()),
        age: 0,
        nickname: None,
        aliases: vec!["original".to_string()],
        finalized: 0,
    }
}

fn anonymizer(seed: u64) -> Anonymizer {
    let mut registry = Registry::new();
    registry.register::<Customer>();
    Anonymizer::new(registry, AnonymizeOptions::default().with_seed(seed)).expect("anonymizer")
}

#[test]
fn absent_object_is_rejected() {
    let mut anonymizer = anonymizer(1);
    let result = anonymizer.anonymize::<Customer>(None);
    assert!(matches!(result, Err(AnonymizeError::Anonymization(_))));
    assert_eq!(anonymizer.report().objects_anonymized, 0);
}

#[test]
fn unregistered_type_is_rejected_before_mutation() {
    #[derive(Debug, Clone, PartialEq)]
    struct Stranger {
        name: String,
    }

    let mut anonymizer = anonymizer(1);
    let mut stranger = Stranger {
        name: "kept".to_string(),
    };
    let result = anonymizer.anonymize(Some(&mut stranger));
    assert!(matches!(result, Err(AnonymizeError::Anonymization(_))));
    assert_eq!(stranger.name, "kept");
}

#[test]
fn replaces_marked_fields_within_bounds() {
    let mut anonymizer = anonymizer(11);
    for _ in 0..20 {
        let mut target = customer();
        anonymizer.anonymize(Some(&mut target)).expect("anonymize");

        assert!((18..65).contains(&target.age));
        assert_eq!(target.login.as_ref().map(String::len), Some(5));
        assert!(target.nickname.is_none());
    }
}

#[test]
fn email_is_replaced_with_a_well_formed_address() {
    let shape = Regex::new(r"^[a-z]+\.[a-z]+@[a-z]+\.[a-z]+$").expect("regex");
    let mut anonymizer = anonymizer(5);
    let mut target = customer();
    anonymizer.anonymize(Some(&mut target)).expect("anonymize");

    let email = target.email.expect("email kept set");
    assert_ne!(email, "a@a.com");
    assert!(shape.is_match(&email), "unexpected email {email}");
}

#[test]
fn collections_grow_by_the_repetition_count() {
    let mut anonymizer = anonymizer(3);
    for _ in 0..20 {
        let mut target = customer();
        anonymizer.anonymize(Some(&mut target)).expect("anonymize");

        let added = target.aliases.len() - 1;
        assert!((2..4).contains(&added), "added {added} aliases");
        assert_eq!(target.aliases[0], "original");
    }
}

#[test]
fn completion_hook_runs_once_per_object() {
    let mut anonymizer = anonymizer(9);
    let mut target = customer();
    anonymizer.anonymize(Some(&mut target)).expect("anonymize");
    assert_eq!(target.finalized, 1);
}

#[test]
fn same_seed_gives_same_values() {
    let mut first = customer();
    let mut second = customer();
    anonymizer(42)
        .anonymize(Some(&mut first))
        .expect("first run");
    anonymizer(42)
        .anonymize(Some(&mut second))
        .expect("second run");
    assert_eq!(first, second);
}

#[test]
fn report_counts_processed_fields() {
    let mut anonymizer = anonymizer(17);
    let mut target = customer();
    anonymizer.anonymize(Some(&mut target)).expect("anonymize");

    let report = anonymizer.take_report();
    assert_eq!(report.objects_anonymized, 1);
    assert_eq!(report.fields_replaced, 3);
    assert_eq!(report.fields_skipped, 1);
    assert_eq!(report.elements_appended, (target.aliases.len() - 1) as u64);
    assert_eq!(report.hooks_invoked, 1);
    assert_eq!(report.strategy_usage.get("string.email"), Some(&1));
    assert_eq!(report.strategy_usage.get("number.integer"), Some(&1));
    assert_eq!(anonymizer.report().objects_anonymized, 0);
}

#[derive(Debug, Clone, PartialEq)]
struct Ticket {
    code: Option<String>,
    poisoned: bool,
}

impl Anonymizable for Ticket {
    fn schema() -> Schema<Self> {
        Schema::<Ticket>::builder("Ticket")
            .scalar(
                "code",
                StringSpec::new(StringDomain::LicensePlate),
                |ticket| ticket.code.as_ref(),
                |ticket, value| ticket.code = Some(value),
            )
            .try_hook("validate", |ticket| {
                if ticket.poisoned {
                    Err("poisoned ticket".into())
                } else {
                    Ok(())
                }
            })
            .build()
    }
}

fn ticket(poisoned: bool) -> Ticket {
    Ticket {
        code: Some("ORIGINAL".to_string()),
        poisoned,
    }
}

#[test]
fn sequence_stops_at_first_failure() {
    let mut registry = Registry::new();
    registry.register::<Ticket>();
    let mut anonymizer =
        Anonymizer::new(registry, AnonymizeOptions::default().with_seed(2)).expect("anonymizer");

    let mut tickets = vec![ticket(false), ticket(true), ticket(false)];
    let result = anonymizer.anonymize_all(Some(tickets.iter_mut()));

    match result {
        Err(AnonymizeError::HookInvocation { hook, source, .. }) => {
            assert_eq!(hook, "validate");
            assert_eq!(source.to_string(), "poisoned ticket");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_ne!(tickets[0].code.as_deref(), Some("ORIGINAL"));
    assert_eq!(tickets[2], ticket(false));
    assert_eq!(anonymizer.report().objects_anonymized, 1);
}

#[test]
fn absent_sequence_is_rejected() {
    let mut anonymizer = anonymizer(1);
    let result = anonymizer.anonymize_all::<Customer, Vec<&mut Customer>>(None);
    assert!(matches!(result, Err(AnonymizeError::Anonymization(_))));
}

#[derive(Debug)]
struct Archive {
    labels: Box<[String]>,
    badge: Option<String>,
    serial: Option<String>,
}

#[test]
fn fixed_size_containers_are_unsupported() {
    let mut registry = Registry::new();
    registry.insert(
        Schema::<Archive>::builder("Archive")
            .collection(
                "labels",
                StringSpec::new(StringDomain::String).repeat(1, 3),
                |archive| Some(&archive.labels),
                |archive| Some(&mut archive.labels),
            )
            .build(),
    );
    let mut anonymizer =
        Anonymizer::new(registry, AnonymizeOptions::default().with_seed(4)).expect("anonymizer");
    let mut archive = Archive {
        labels: vec!["a".to_string()].into_boxed_slice(),
        badge: None,
        serial: None,
    };

    let result = anonymizer.anonymize(Some(&mut archive));
    match result {
        Err(AnonymizeError::UnsupportedContainer { field, .. }) => assert_eq!(field, "labels"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(archive.labels.len(), 1);
}

#[test]
fn read_only_field_reports_missing_writer() {
    let mut registry = Registry::new();
    registry.insert(
        Schema::<Archive>::builder("Archive")
            .read_only("badge", StringSpec::new(StringDomain::Url), |archive| {
                archive.badge.as_ref()
            })
            .build(),
    );
    let mut anonymizer =
        Anonymizer::new(registry, AnonymizeOptions::default().with_seed(4)).expect("anonymizer");
    let mut archive = Archive {
        labels: Box::new([]),
        badge: Some("kept".to_string()),
        serial: None,
    };

    match anonymizer.anonymize(Some(&mut archive)) {
        Err(AnonymizeError::MethodResolution {
            field, accessor, ..
        }) => {
            assert_eq!(field, "badge");
            assert_eq!(accessor, "set_badge");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(archive.badge.as_deref(), Some("kept"));
}

#[test]
fn write_only_field_reports_missing_reader() {
    let mut registry = Registry::new();
    registry.insert(
        Schema::<Archive>::builder("Archive")
            .write_only(
                "badge",
                StringSpec::new(StringDomain::Url),
                |archive: &mut Archive, value: String| archive.badge = Some(value),
            )
            .build(),
    );
    let mut anonymizer =
        Anonymizer::new(registry, AnonymizeOptions::default().with_seed(4)).expect("anonymizer");
    let mut archive = Archive {
        labels: Box::new([]),
        badge: Some("kept".to_string()),
        serial: None,
    };

    match anonymizer.anonymize(Some(&mut archive)) {
        Err(AnonymizeError::MethodResolution { accessor, .. }) => {
            assert_eq!(accessor, "get_badge");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn locked_field_reports_access_error() {
    let mut registry = Registry::new();
    registry.insert(
        Schema::<Archive>::builder("Archive")
            .locked(
                "serial",
                StringSpec::new(StringDomain::NationalId),
                |archive| archive.serial.as_ref(),
                "serial numbers are immutable",
            )
            .build(),
    );
    let mut anonymizer =
        Anonymizer::new(registry, AnonymizeOptions::default().with_seed(4)).expect("anonymizer");
    let mut archive = Archive {
        labels: Box::new([]),
        badge: None,
        serial: Some("SN-1".to_string()),
    };

    match anonymizer.anonymize(Some(&mut archive)) {
        Err(AnonymizeError::Access {
            accessor, reason, ..
        }) => {
            assert_eq!(accessor, "set_serial");
            assert_eq!(reason, "serial numbers are immutable");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(archive.serial.as_deref(), Some("SN-1"));
}

#[derive(Debug, Default)]
struct Meter {
    reading: i64,
}

#[test]
fn number_marker_takes_priority_over_string_marker() {
    let markers = Markers::from(StringSpec::new(StringDomain::Email))
        .with_number(NumberSpec::new(NumberDomain::Long).range(40, 41));
    let mut registry = Registry::new();
    registry.insert(
        Schema::<Meter>::builder("Meter")
            .scalar(
                "reading",
                markers,
                |meter| Some(&meter.reading),
                |meter, value| meter.reading = value,
            )
            .build(),
    );
    let mut anonymizer =
        Anonymizer::new(registry, AnonymizeOptions::default().with_seed(8)).expect("anonymizer");
    let mut meter = Meter::default();

    anonymizer.anonymize(Some(&mut meter)).expect("anonymize");
    assert_eq!(meter.reading, 40);
    assert_eq!(anonymizer.report().strategy_usage.get("number.long"), Some(&1));
}

#[test]
fn generated_value_must_fit_the_field_type() {
    let mut registry = Registry::new();
    registry.insert(
        Schema::<Meter>::builder("Meter")
            .scalar(
                "reading",
                NumberSpec::new(NumberDomain::Double).range(0, 10),
                |meter| Some(&meter.reading),
                |meter, value| meter.reading = value,
            )
            .build(),
    );
    let mut anonymizer =
        Anonymizer::new(registry, AnonymizeOptions::default().with_seed(8)).expect("anonymizer");
    let mut meter = Meter { reading: 7 };

    let result = anonymizer.anonymize(Some(&mut meter));
    assert!(matches!(result, Err(AnonymizeError::Configuration(_))));
    assert_eq!(meter.reading, 7);
}

#[test]
fn invalid_options_are_rejected() {
    let options = AnonymizeOptions {
        default_min_length: 9,
        default_max_length: 1,
        ..AnonymizeOptions::default()
    };
    let result = Anonymizer::new(Registry::new(), options);
    assert!(matches!(result, Err(AnonymizeError::Options(_))));
}

#[derive(Debug, Default)]
struct Bag {
    queue: VecDeque<u32>,
    chain: LinkedList<String>,
    ordered: BTreeSet<i64>,
    hashed: HashSet<String>,
}

fn bag_anonymizer(markers: [Markers; 4]) -> Anonymizer {
    let [queue, chain, ordered, hashed] = markers;
    let mut registry = Registry::new();
    registry.insert(
        Schema::<Bag>::builder("Bag")
            .collection("queue", queue, |bag| Some(&bag.queue), |bag| Some(&mut bag.queue))
            .collection("chain", chain, |bag| Some(&bag.chain), |bag| Some(&mut bag.chain))
            .collection(
                "ordered",
                ordered,
                |bag| Some(&bag.ordered),
                |bag| Some(&mut bag.ordered),
            )
            .collection(
                "hashed",
                hashed,
                |bag| Some(&bag.hashed),
                |bag| Some(&mut bag.hashed),
            )
            .build(),
    );
    Anonymizer::new(registry, AnonymizeOptions::default().with_seed(21)).expect("anonymizer")
}

fn bag() -> Bag {
    Bag {
        queue: VecDeque::from([7]),
        chain: LinkedList::from(["head".to_string()]),
        ordered: BTreeSet::from([1]),
        hashed: HashSet::from(["y".to_string()]),
    }
}

#[test]
fn every_appendable_container_kind_grows_in_place() {
    let mut anonymizer = bag_anonymizer([
        NumberSpec::new(NumberDomain::Integer).range(0, 1000).repeat(2, 3).into(),
        StringSpec::new(StringDomain::Ipv4).repeat(3, 4).into(),
        NumberSpec::new(NumberDomain::Long).range(5, 6).repeat(3, 4).into(),
        StringSpec::new(StringDomain::FromValues)
            .values(["x"])
            .repeat(2, 3)
            .into(),
    ]);
    let mut target = bag();

    anonymizer.anonymize(Some(&mut target)).expect("anonymize");

    assert_eq!(target.queue.len(), 3);
    assert_eq!(target.queue.front(), Some(&7));
    assert_eq!(target.chain.len(), 4);
    assert_eq!(target.chain.front().map(String::as_str), Some("head"));
    assert_eq!(target.ordered, BTreeSet::from([1, 5]));
    assert_eq!(
        target.hashed,
        HashSet::from(["x".to_string(), "y".to_string()])
    );

    let report = anonymizer.report();
    assert_eq!(report.elements_appended, 2 + 3 + 1 + 1);
    assert_eq!(report.strategy_usage.get("number.long"), Some(&3));
    assert_eq!(report.strategy_usage.get("string.from_values"), Some(&2));
}

#[test]
fn repetition_upper_bound_is_exclusive() {
    let mut anonymizer = bag_anonymizer([
        NumberSpec::new(NumberDomain::Integer).repeat(3, 4).into(),
        StringSpec::new(StringDomain::Url).repeat(2, 2).into(),
        Markers::default(),
        Markers::default(),
    ]);
    for _ in 0..20 {
        let mut target = bag();
        anonymizer.anonymize(Some(&mut target)).expect("anonymize");
        assert_eq!(target.queue.len(), 1 + 3);
        assert_eq!(target.chain.len(), 1 + 2);
    }
}

#[test]
fn inverted_repetition_is_a_configuration_error() {
    let mut anonymizer = bag_anonymizer([
        NumberSpec::new(NumberDomain::Integer).repeat(4, 2).into(),
        Markers::default(),
        Markers::default(),
        Markers::default(),
    ]);
    let mut target = bag();

    let result = anonymizer.anonymize(Some(&mut target));
    assert!(matches!(result, Err(AnonymizeError::Configuration(_))));
    assert_eq!(target.queue, VecDeque::from([7]));
}

#[derive(Debug, Default)]
struct Journal {
    title: Option<String>,
    events: Vec<&'static str>,
}

#[test]
fn each_hook_runs_once_in_registration_order() {
    let mut registry = Registry::new();
    registry.insert(
        Schema::<Journal>::builder("Journal")
            .scalar(
                "title",
                StringSpec::new(StringDomain::Text).length(10, 20),
                |journal| journal.title.as_ref(),
                |journal, value| journal.title = Some(value),
            )
            .hook("stamp", |journal| journal.events.push("stamp"))
            .hook("seal", |journal| journal.events.push("seal"))
            .build(),
    );
    let mut anonymizer =
        Anonymizer::new(registry, AnonymizeOptions::default().with_seed(12)).expect("anonymizer");
    let mut journal = Journal {
        title: Some("Minutes".to_string()),
        events: Vec::new(),
    };

    anonymizer.anonymize(Some(&mut journal)).expect("anonymize");

    assert_eq!(journal.events, ["stamp", "seal"]);
    assert_eq!(anonymizer.report().hooks_invoked, 2);
}

#[test]
fn hooks_run_on_schemas_without_marked_fields() {
    let mut registry = Registry::new();
    registry.insert(
        Schema::<Journal>::builder("Journal")
            .hook("stamp", |journal| journal.events.push("stamp"))
            .build(),
    );
    let mut anonymizer =
        Anonymizer::new(registry, AnonymizeOptions::default().with_seed(12)).expect("anonymizer");
    let mut journal = Journal::default();

    anonymizer.anonymize(Some(&mut journal)).expect("anonymize");

    assert_eq!(journal.events, ["stamp"]);
    assert!(journal.title.is_none());
}
