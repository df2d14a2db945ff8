//! Shared record fixtures for the integration tests.

use proptree::{Field, Group, Record, RecordField, SeqField};

/// The canonical two-field composite: `{"Example": {"A": 1, "B": "hi"}}`.
#[derive(Debug, Clone)]
pub struct Example {
    pub props: Group,
    pub a: Field<i64>,
    pub b: Field<String>,
}

impl Default for Example {
    fn default() -> Self {
        let mut props = Group::named("Example");
        let a = props.add("A", 1_i64);
        let b = props.add("B", String::from("hi"));
        Example { props, a, b }
    }
}

impl Record for Example {
    fn props(&self) -> &Group {
        &self.props
    }

    fn props_mut(&mut self) -> &mut Group {
        &mut self.props
    }
}

impl Example {
    /// Builds an example with the given field values.
    pub fn with(a: i64, b: &str) -> Self {
        let mut ex = Example::default();
        let (ha, hb) = (ex.a.clone(), ex.b.clone());
        ex.props.set(&ha, a);
        ex.props.set(&hb, b.to_string());
        ex
    }

    pub fn a(&self) -> i64 {
        *self.props.get(&self.a).expect("field A is registered")
    }

    pub fn b(&self) -> &str {
        self.props.get(&self.b).expect("field B is registered")
    }

    pub fn set_a(&mut self, value: i64) {
        let handle = self.a.clone();
        self.props.set(&handle, value);
    }
}

/// A composite nesting a record and a sequence, for composition tests:
/// `{"Party": {"Example": {...}, "Members": [...], "Banner": "..."}}`.
///
/// The nested record registers under its own group name, `"Example"`.
#[derive(Debug, Clone)]
pub struct Party {
    pub props: Group,
    pub leader: RecordField<Example>,
    pub members: SeqField<Example>,
    pub banner: Field<String>,
}

impl Default for Party {
    fn default() -> Self {
        let mut props = Group::named("Party");
        let leader = props.add_record(Example::default());
        let members = props.add_sequence::<Example>("Members");
        let banner = props.add("Banner", String::from("plain"));
        Party {
            props,
            leader,
            members,
            banner,
        }
    }
}

impl Record for Party {
    fn props(&self) -> &Group {
        &self.props
    }

    fn props_mut(&mut self) -> &mut Group {
        &mut self.props
    }
}
