use quickcheck::{Arbitrary, Gen};

use crate::{Array, Map, Value};

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct JsonNumber(pub(crate) f64);

impl Arbitrary for JsonNumber {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut value = f64::arbitrary(g);
        while !value.is_finite() {
            value = f64::arbitrary(g);
        }

        Self(value)
    }
}

impl Arbitrary for Value {
    fn arbitrary(g: &mut Gen) -> Self {
        fn gen_val(g: &mut Gen, depth: usize) -> Value {
            let kinds = if depth == 0 { 4 } else { 6 };
            match usize::arbitrary(g) % kinds {
                0 => Value::Null,
                1 => Value::Boolean(bool::arbitrary(g)),
                2 => Value::Number(JsonNumber::arbitrary(g).0),
                3 => Value::String(String::arbitrary(g)),
                4 => {
                    let len = usize::arbitrary(g) % 3;
                    (0..len).map(|_| gen_val(g, depth - 1)).collect::<Array>().into()
                }
                _ => {
                    let len = usize::arbitrary(g) % 3;
                    (0..len)
                        .map(|_| (String::arbitrary(g), gen_val(g, depth - 1)))
                        .collect::<Map>()
                        .into()
                }
            }
        }

        let depth = usize::arbitrary(g) % 3;
        gen_val(g, depth)
    }
}
