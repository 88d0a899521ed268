//! Alias query construction
//!
//! Anchors a query on the first outgoing control-flow edge of the
//! statement. Which successor is taken does not matter: aliasing is
//! evaluated at the control-flow point, not on a particular branch.

use crate::errors::{AliasError, AliasResult};
use crate::features::aliasing::domain::{AliasQuery, ControlFlowEdge, MethodId, StmtId, Variable};
use crate::features::aliasing::ports::ProgramModel;

pub struct AliasQueryBuilder<'a> {
    program: &'a dyn ProgramModel,
}

impl<'a> AliasQueryBuilder<'a> {
    pub fn new(program: &'a dyn ProgramModel) -> Self {
        Self { program }
    }

    /// Build the query for `variable` at `stmt`
    ///
    /// Fails with [`AliasError::QueryConstruction`] if `stmt` has no
    /// successor.
    pub fn build(
        &self,
        stmt: StmtId,
        method: MethodId,
        variable: Variable,
    ) -> AliasResult<AliasQuery> {
        match self.program.successors_of(stmt).first() {
            Some(&successor) => Ok(AliasQuery::new(
                ControlFlowEdge {
                    method,
                    stmt,
                    successor,
                },
                variable,
            )),
            None => Err(AliasError::query_construction(stmt, method)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    struct Straightline {
        succs: FxHashMap<StmtId, Vec<StmtId>>,
    }

    impl ProgramModel for Straightline {
        fn method_of(&self, _stmt: StmtId) -> MethodId {
            MethodId(0)
        }

        fn successors_of(&self, stmt: StmtId) -> &[StmtId] {
            self.succs.get(&stmt).map(Vec::as_slice).unwrap_or(&[])
        }

        fn is_call_statement(&self, _stmt: StmtId) -> bool {
            false
        }

        fn method_signature(&self, _method: MethodId) -> &str {
            "void main()"
        }
    }

    fn program() -> Straightline {
        let mut succs = FxHashMap::default();
        succs.insert(StmtId(1), vec![StmtId(2), StmtId(3)]);
        succs.insert(StmtId(2), vec![StmtId(3)]);
        Straightline { succs }
    }

    #[test]
    fn test_build_takes_first_successor() {
        let program = program();
        let query = AliasQueryBuilder::new(&program)
            .build(StmtId(1), MethodId(0), Variable(4))
            .unwrap();

        assert_eq!(query.edge().stmt, StmtId(1));
        assert_eq!(query.edge().successor, StmtId(2));
        assert_eq!(query.variable(), Variable(4));
    }

    #[test]
    fn test_build_without_successor_fails() {
        let program = program();
        let result = AliasQueryBuilder::new(&program).build(StmtId(3), MethodId(0), Variable(4));

        assert!(matches!(
            result,
            Err(AliasError::QueryConstruction {
                statement: StmtId(3),
                method: MethodId(0)
            })
        ));
    }
}
