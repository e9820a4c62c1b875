use crate::error::GtiError;
use crate::options::GlobalTypeInfoOptions;
use crate::state::GlobalTypeInfoBuilder;
use gti_ast::{FunctionLit, JsDoc, SourceFile, Stmt, lower};
use gti_solver::NominalHierarchy;

fn two_classes() -> SourceFile {
    SourceFile::new(
        "cycle.js",
        [
            Stmt::function(FunctionLit::named("A").with_doc(JsDoc::new().constructor())),
            Stmt::function(FunctionLit::named("B").with_doc(JsDoc::new().constructor())),
        ],
    )
}

#[test]
fn test_unbreakable_cycle_hits_the_ceiling() {
    let program = lower(&two_classes());
    let options = GlobalTypeInfoOptions {
        max_worklist_iterations: 8,
        ..GlobalTypeInfoOptions::default()
    };
    let mut builder = GlobalTypeInfoBuilder::with_options(&program, options);
    builder.build_scopes().unwrap();
    let a = builder.table.nominal_by_name("A").unwrap();
    let b = builder.table.nominal_by_name("B").unwrap();
    builder.table.force_super_class(a, b);
    builder.table.force_super_class(b, a);

    let err = builder.finalize_nominal_types().unwrap_err();
    let GtiError::WorklistCeilingExceeded { ceiling, pending } = err else {
        panic!("expected the worklist ceiling, got {err:?}");
    };
    assert_eq!(ceiling, 8);
    assert_eq!(pending.len(), 2);
    assert!(pending.contains(&builder.table.nominal_name(a)));
}

#[test]
fn test_acyclic_hierarchy_stays_under_the_ceiling() {
    let program = lower(&two_classes());
    let options = GlobalTypeInfoOptions {
        max_worklist_iterations: 1,
        ..GlobalTypeInfoOptions::default()
    };
    let mut builder = GlobalTypeInfoBuilder::with_options(&program, options);
    builder.build_scopes().unwrap();
    let a = builder.table.nominal_by_name("A").unwrap();
    let b = builder.table.nominal_by_name("B").unwrap();
    // A is discovered first but extends B, so it is re-queued once.
    builder.table.force_super_class(a, b);

    let stats = builder.finalize_nominal_types().unwrap();
    assert_eq!(stats.finalized, 2);
    assert_eq!(stats.requeues, 1);
    assert!(builder.table.nominal(a).is_finalized());
}
