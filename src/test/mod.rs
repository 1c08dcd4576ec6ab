use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    signatures::{MemberFlags, MemberKind, MemberRecord, MemberShape, SignatureNode},
    typesystem::{TypeId, SELF_TYPE_HANDLE, WELL_KNOWN_TYPE_BASE},
};

const KINDS: [MemberKind; 6] = [
    MemberKind::Field,
    MemberKind::Method,
    MemberKind::Constructor,
    MemberKind::Property,
    MemberKind::PropertyGet,
    MemberKind::PropertySet,
];

// Nodes below this depth are always leaves
const MAX_GENERATED_DEPTH: usize = 4;

/// Seeded source of random, valid member records
///
/// Every record it returns passes [`MemberRecord::validate`]: method generic parameters stay
/// below the record's arity and the self type only ever appears as a `Direct` handle.
pub struct RecordGenerator {
    rng: StdRng,
}

impl RecordGenerator {
    pub fn new(seed: u64) -> Self {
        RecordGenerator {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn records(&mut self, count: usize) -> Vec<MemberRecord> {
        (0..count).map(|_| self.record()).collect()
    }

    pub fn record(&mut self) -> MemberRecord {
        let kind = KINDS[self.rng.gen_range(0..KINDS.len())];

        let mut flags = kind.flag();
        if self.rng.gen_bool(0.3) {
            flags |= MemberFlags::STATIC;
        }
        if self.rng.gen_bool(0.2) {
            flags |= MemberFlags::VIRTUAL;
        }

        let declaring_type = self.type_id();
        // The grammar stores an arity for fields too
        let arity = self.rng.gen_range(0..=2);
        let shape = if kind == MemberKind::Field {
            MemberShape::Field(self.node(arity, 0))
        } else {
            let param_count = self.rng.gen_range(0..=4);
            let return_type = self.node(arity, 0);
            let parameters = (0..param_count).map(|_| self.node(arity, 0)).collect();
            MemberShape::Invocable {
                return_type,
                parameters,
            }
        };

        MemberRecord::new(flags, declaring_type, arity, shape).expect("generated record is valid")
    }

    fn type_id(&mut self) -> TypeId {
        if self.rng.gen_bool(0.5) {
            TypeId::Special(self.rng.gen_range(0..WELL_KNOWN_TYPE_BASE))
        } else {
            TypeId::WellKnown(self.rng.gen_range(0..SELF_TYPE_HANDLE - WELL_KNOWN_TYPE_BASE))
        }
    }

    pub fn node(&mut self, arity: u16, depth: usize) -> SignatureNode {
        let choice = if depth >= MAX_GENERATED_DEPTH {
            self.rng.gen_range(0..3)
        } else {
            self.rng.gen_range(0..7)
        };

        match choice {
            0 if self.rng.gen_bool(0.1) => SignatureNode::Direct(TypeId::GenericParamOfSelf),
            0 => SignatureNode::Direct(self.type_id()),
            1 => SignatureNode::GenericTypeParam(self.rng.gen_range(0..4)),
            2 if arity > 0 => SignatureNode::GenericMethodParam(self.rng.gen_range(0..arity)),
            2 => SignatureNode::Direct(self.type_id()),
            3 => SignatureNode::Array(Box::new(self.node(arity, depth + 1))),
            4 => SignatureNode::Pointer(Box::new(self.node(arity, depth + 1))),
            5 => SignatureNode::ByRef(Box::new(self.node(arity, depth + 1))),
            _ => {
                let definition = self.type_id();
                let arg_count = self.rng.gen_range(0..=3);
                let args = (0..arg_count)
                    .map(|_| self.node(arity, depth + 1))
                    .collect();
                SignatureNode::GenericInstance(definition, args)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_is_deterministic() {
        let a = RecordGenerator::new(42).records(20);
        let b = RecordGenerator::new(42).records(20);
        assert_eq!(a, b);
    }

    #[test]
    fn test_generator_covers_every_kind() {
        let records = RecordGenerator::new(1).records(300);
        for kind in KINDS {
            assert!(records.iter().any(|r| r.kind() == Some(kind)), "{kind:?}");
        }
        assert!(records.iter().any(|r| r.max_method_param().is_some()));
        assert!(records
            .iter()
            .any(|r| r.kind() == Some(MemberKind::Field) && r.arity > 0));
    }

    #[test]
    fn test_generator_reaches_top_of_well_known_partition() {
        let mut generator = RecordGenerator::new(9);
        let top = (0..4000)
            .filter_map(|_| match generator.type_id() {
                TypeId::WellKnown(n) => Some(n),
                _ => None,
            })
            .max();
        assert!(top.is_some_and(|n| n > 0xF000));
        assert!(top.is_some_and(|n| n < SELF_TYPE_HANDLE - WELL_KNOWN_TYPE_BASE));
    }
}
