use propinfo::{
    codec::{JsonOutputter, XmlContext, XmlDocument},
    config::Config,
    error::PropertyError,
    prelude::*,
    property::ErasedProperty,
};
use proptest::prelude::*;
use std::{any::Any, cmp::Ordering};

#[derive(Clone, Debug, Default, Model, PartialEq)]
#[model(name = "Employee")]
pub struct Staff {
    #[prop(required)]
    pub name: String,
    #[prop(required)]
    pub age: i32,
    pub manager: Option<String>,
    pub skills: Vec<String>,
    #[prop(network_transient)]
    pub salary: u64,
    #[prop(storage_transient)]
    pub session: Option<String>,
    #[prop(sql = "SMALLINT", name = "is_active")]
    pub active: bool,
    #[prop(skip)]
    pub scratch: u8,
}

#[allow(non_snake_case)]
#[derive(Debug, Default, Model)]
pub struct Account {
    pub userId: i32,
    pub userid: i32,
}

#[derive(Debug, Default, Model)]
pub struct A {
    pub b_c: i32,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Default, Model)]
pub struct A_B {
    pub c: i32,
}

fn staff() -> Staff {
    Staff {
        name: "Grace".to_string(),
        age: 30,
        manager: Some("Ada".to_string()),
        skills: vec!["cobol".to_string(), "navy".to_string()],
        salary: 90_000,
        session: Some("s-1".to_string()),
        active: true,
        scratch: 0,
    }
}

#[test]
fn derived_class_lists_declared_properties() {
    let class = Staff::class_info();

    assert_eq!(class.name(), "Employee");
    assert!(class.path().ends_with("::Staff"));
    assert_eq!(
        class.properties().iter().map(|p| p.name()).collect::<Vec<_>>(),
        vec!["name", "age", "manager", "skills", "salary", "session", "is_active"]
    );

    let active = class.property("is_active").expect("is_active");
    assert_eq!(active.sql_type(), "SMALLINT");
    assert_eq!(class.property("age").expect("age").sql_type(), "BIGINT");
    assert!(class.property("scratch").is_none());
}

#[test]
fn accessor_fns_are_bound_to_the_class() {
    let class = Staff::class_info();
    let age = Staff::age_property();

    assert_eq!(age.value_type(), ValueType::one(Primitive::Int));
    assert!(age.is_required());
    assert_eq!(age.owning_class().expect("bound"), class.class_ref());
    assert!(Staff::salary_property().is_network_transient());
    assert!(Staff::session_property().is_storage_transient());
    assert_eq!(Staff::active_property().name(), "is_active");
}

#[test]
fn similar_field_and_type_names_stay_distinct() {
    let account = Account {
        userId: 1,
        userid: 2,
    };
    assert_eq!(Account::userId_property().name(), "userId");
    assert_eq!(Account::userid_property().name(), "userid");
    assert_eq!(Account::userId_property().get(&account), Value::Int(1));
    assert_eq!(Account::userid_property().get(&account), Value::Int(2));

    assert_eq!(A::b_c_property().owning_class().expect("bound").name(), "A");
    assert_eq!(A_B::c_property().owning_class().expect("bound").name(), "A_B");
    assert_eq!(A::b_c_property().get(&A { b_c: 3 }), Value::Int(3));
    assert_eq!(A_B::c_property().get(&A_B { c: 4 }), Value::Int(4));
}

#[test]
fn age_reads_writes_and_diffs() {
    let age = Staff::age_property();
    let mut subject = Staff::default();

    age.set(&mut subject, Value::Int(30)).expect("set");
    assert_eq!(age.get(&subject), Value::Int(30));
    assert_eq!(age.evaluate(&subject), Value::Int(30));
    assert_eq!(*age.field(&subject), 30);

    age.set_from_string(&mut subject, "31").expect("parse");
    assert_eq!(subject.age, 31);
    assert_eq!(age.get_as_string(&subject), "31");

    let before = Staff {
        age: 30,
        ..staff()
    };
    let after = Staff {
        age: 31,
        ..staff()
    };
    let mut diff = DiffMap::new();
    assert!(age.diff(&before, &after, &mut diff));

    let change = diff.get("age").expect("age change");
    assert_eq!(change.before, Value::Int(30));
    assert_eq!(change.after, Value::Int(31));
    assert_eq!(age.compare(&before, &after), Ordering::Less);
    assert_eq!(
        age.compare_property_to_object(&Value::Int(31), &after),
        Ordering::Equal
    );
}

#[test]
fn writes_reject_bad_values() {
    let mut subject = staff();

    assert!(matches!(
        Staff::age_property().set(&mut subject, Value::from("thirty")),
        Err(PropertyError::TypeMismatch {
            property: "age",
            found: "Text",
            ..
        })
    ));
    assert!(matches!(
        Staff::name_property().set(&mut subject, Value::Null),
        Err(PropertyError::MissingRequired { property: "name" })
    ));
    assert!(matches!(
        Staff::age_property().set_from_string(&mut subject, "3O"),
        Err(PropertyError::Parse { property: "age", .. })
    ));
    assert_eq!(subject, staff());
}

#[test]
fn erased_access_checks_the_receiver() {
    let age: &dyn ErasedProperty = Staff::age_property();
    let mut subject = staff();

    assert_eq!(
        age.get_any(&subject as &dyn Any).expect("receiver"),
        Value::Int(30)
    );
    age.set_any(&mut subject as &mut dyn Any, Value::Int(44))
        .expect("receiver");
    assert_eq!(subject.age, 44);

    assert!(matches!(
        age.get_any(&7_u8 as &dyn Any),
        Err(PropertyError::WrongReceiver { property: "age", .. })
    ));
}

#[test]
fn json_round_trip_and_channels() {
    let class = Staff::class_info();
    let subject = staff();

    let full = class.to_json(&JsonOutputter::full(), &subject).expect("full");
    assert!(full.contains(r#""is_active":true"#));
    assert!(!full.contains("scratch"));
    assert_eq!(class.from_json(&full).expect("decode"), subject);

    let network = class
        .to_json(&JsonOutputter::network(), &subject)
        .expect("network");
    assert!(!network.contains("salary"));
    assert!(network.contains("session"));

    let storage = class
        .to_json(&JsonOutputter::storage(), &subject)
        .expect("storage");
    assert!(storage.contains("salary"));
    assert!(!storage.contains("session"));
}

#[test]
fn config_selects_the_json_channel() {
    let config = Config::from_toml_str("[json]\nmode = \"network\"\n").expect("config");
    let json = Staff::class_info()
        .to_json(&config.outputter(), &staff())
        .expect("json");

    assert!(!json.contains("salary"));
}

#[test]
fn xml_round_trip() {
    let class = Staff::class_info();
    let subject = staff();

    let doc = XmlDocument::new(class.to_xml(&subject).expect("encode")).to_string();
    assert!(doc.contains("<Employee>"));
    assert!(doc.contains("<is_active>true</is_active>"));

    let decoded = class
        .from_xml_str(&XmlContext::strict(), &doc)
        .expect("decode");
    assert_eq!(decoded, subject);
}

#[test]
fn class_diff_feeds_apply_diff() {
    let class = Staff::class_info();
    let before = staff();
    let after = Staff {
        age: 31,
        manager: None,
        ..staff()
    };

    let diff = class.diff(&before, &after);
    assert_eq!(diff.names().collect::<Vec<_>>(), vec!["age", "manager"]);

    let mut target = before;
    class.apply_diff(&mut target, &diff).expect("apply");
    assert_eq!(target, after);
}

#[test]
fn index_orders_by_property() {
    let mut index: PropertyIndex<Staff> = PropertyIndex::new(Staff::age_property());
    for (name, age) in [("c", 50), ("a", 20), ("b", 35)] {
        index.insert(Staff {
            name: name.to_string(),
            age,
            ..staff()
        });
    }

    let names = index
        .range(&Value::Int(30), &Value::Int(60))
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["b", "c"]);
}

proptest! {
    #[test]
    fn text_form_round_trips_through_the_age_property(n in any::<i32>()) {
        let age = Staff::age_property();
        let mut subject = Staff::default();

        prop_assert!(age.set_from_string(&mut subject, &n.to_string()).is_ok());
        prop_assert_eq!(subject.age, n);
        prop_assert_eq!(age.get_as_string(&subject), n.to_string());
    }

    #[test]
    fn diff_records_only_changes(a in any::<i32>(), b in any::<i32>()) {
        let before = Staff { age: a, ..staff() };
        let after = Staff { age: b, ..staff() };
        let diff = Staff::class_info().diff(&before, &after);

        prop_assert_eq!(diff.contains("age"), a != b);
        prop_assert_eq!(diff.len(), usize::from(a != b));
    }
}
