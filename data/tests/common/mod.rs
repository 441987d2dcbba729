// Generators shared by the property tests

#![allow(dead_code)]

use plinth_data::*;
use proptest::prelude::*;

pub fn arb_integer() -> impl Strategy<Value = BigInt> {
    prop_oneof![
        any::<i64>().prop_map(BigInt::from),
        any::<u64>().prop_map(BigInt::from),
        // Anything up to 640 bits, either side of zero
        prop::collection::vec(any::<u8>(), 0..80).prop_map(|b| BigInt::from_signed_bytes_be(&b)),
    ]
}

/// Non-empty byte strings, straddling the 64 byte chunk boundary
pub fn arb_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..150)
}

pub fn arb_constr_index() -> impl Strategy<Value = BigUint> {
    prop_oneof![
        (0u64..7).prop_map(BigUint::from),
        (7u64..128).prop_map(BigUint::from),
        any::<u64>().prop_map(BigUint::from),
        prop::collection::vec(any::<u8>(), 0..20).prop_map(|b| BigUint::from_bytes_be(&b)),
    ]
}

/// Generate a Data value with limited recursion depth
pub fn arb_data() -> impl Strategy<Value = Data> {
    let leaf = prop_oneof![
        arb_integer().prop_map(Data::Integer),
        arb_bytes().prop_map(|b| Data::ByteArray(Bytes::new(b).unwrap())),
    ];

    leaf.prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Data::List),
            prop::collection::vec((inner.clone(), inner.clone()), 0..4).prop_map(Data::Map),
            (arb_constr_index(), prop::collection::vec(inner, 0..4))
                .prop_map(|(index, fields)| Data::Constr(Constr::new(index, fields))),
        ]
    })
}

pub fn arb_literal() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::from),
        "[a-z]{1,8}".prop_map(Value::Text),
    ]
}

/// Generate a Schema with limited recursion depth
pub fn arb_schema() -> impl Strategy<Value = Schema> {
    let leaf = prop_oneof![
        Just(Schema::ByteArray),
        Just(Schema::Integer),
        Just(Schema::Boolean),
        prop::collection::vec(arb_literal(), 1..4).prop_map(Schema::Literal),
    ];

    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(Schema::array),
            (inner.clone(), inner.clone()).prop_map(|(k, v)| Schema::map(k, v)),
            inner.clone().prop_map(Schema::nullable),
            prop::collection::vec(inner.clone(), 0..4).prop_map(|fields| {
                Schema::structure(
                    fields
                        .into_iter()
                        .enumerate()
                        .map(|(idx, s)| (format!("field{idx}"), s)),
                )
            }),
            prop::collection::vec(inner.clone(), 0..4).prop_map(|e| Schema::tuple(e)),
            prop::collection::vec(inner, 1..4).prop_map(|v| Schema::union(v)),
        ]
    })
}

/// Generate a native value accepted by `schema`
pub fn arb_value_for_schema(schema: &Schema) -> BoxedStrategy<Value> {
    match schema {
        Schema::ByteArray => arb_bytes()
            .prop_map(|b| Value::Text(Bytes::new(b).unwrap().to_hex()))
            .boxed(),
        Schema::Integer => arb_integer().prop_map(Value::Integer).boxed(),
        Schema::Boolean => any::<bool>().prop_map(Value::Bool).boxed(),
        Schema::Literal(values) => prop::sample::select(values.clone()).boxed(),
        Schema::Array(element) => prop::collection::vec(arb_value_for_schema(element), 0..4)
            .prop_map(Value::List)
            .boxed(),
        Schema::Map(key, value) => prop::collection::vec(
            (arb_value_for_schema(key), arb_value_for_schema(value)),
            0..4,
        )
        .prop_map(Value::Map)
        .boxed(),
        Schema::Nullable(inner) => {
            prop_oneof![Just(Value::Null), arb_value_for_schema(inner)].boxed()
        }
        Schema::Struct(s) => s
            .fields
            .iter()
            .map(|f| {
                let name = f.name.clone();
                arb_value_for_schema(&f.schema)
                    .prop_map(move |v| (name.clone(), v))
                    .boxed()
            })
            .collect::<Vec<_>>()
            .prop_shuffle()
            .prop_map(Value::Record)
            .boxed(),
        Schema::Tuple(elements) => elements
            .iter()
            .map(arb_value_for_schema)
            .collect::<Vec<_>>()
            .prop_map(Value::List)
            .boxed(),
        Schema::Union(variants) => {
            prop::strategy::Union::new(variants.iter().map(arb_value_for_schema)).boxed()
        }
    }
}

pub fn arb_schema_and_value() -> impl Strategy<Value = (Schema, Value)> {
    arb_schema().prop_flat_map(|schema| {
        let value = arb_value_for_schema(&schema);
        (Just(schema), value)
    })
}
