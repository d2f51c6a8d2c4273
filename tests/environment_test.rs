use lexenv::{
    environment_depth, is_empty_environment, Binding, Config, EnvError, Runtime, Value,
    EMPTY_ENVIRONMENT,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn num(n: i64) -> Value {
    Value::Number(n)
}

/// Global `{x: 1}` extended with `{x: 2}`.
fn shadowed_x() -> (Runtime, Value) {
    init_logging();
    let config = Config::default()
        .with_heap_capacity(256)
        .with_binding(Binding::new("x", num(1)));
    let mut rt = Runtime::from_config(&config).unwrap();
    let global = rt.global().unwrap();

    let x = rt.symbol("x").unwrap();
    let params = rt.heap.list(&[x]).unwrap();
    let args = rt.heap.list(&[num(2)]).unwrap();
    let env = rt.extend_with(params, args, global).unwrap();
    (rt, env)
}

fn params(rt: &mut Runtime, names: &[&str]) -> Value {
    let syms: Vec<Value> = names.iter().map(|n| rt.symbol(n).unwrap()).collect();
    rt.heap.list(&syms).unwrap()
}

fn args(rt: &mut Runtime, values: &[i64]) -> Value {
    let vals: Vec<Value> = values.iter().copied().map(num).collect();
    rt.heap.list(&vals).unwrap()
}

#[test]
fn inner_frame_shadows_outer() {
    let (rt, env) = shadowed_x();
    assert_eq!(rt.lookup_variable_value("x", env).unwrap(), num(2));
}

#[test]
fn enclosing_environment_escapes_shadowing() {
    let (rt, env) = shadowed_x();
    let outer = rt.enclosing_environment(env).unwrap();
    assert_eq!(rt.lookup_variable_value("x", outer).unwrap(), num(1));
}

#[test]
fn unbound_variable_is_reported_not_defaulted() {
    let (rt, env) = shadowed_x();
    let err = rt.lookup_variable_value("y", env).unwrap_err();
    assert_eq!(err, EnvError::Unbound("y".into()));
    assert_eq!(rt.find_binding("y", env).unwrap(), None);
}

#[test]
fn find_binding_returns_name_and_value() {
    let (rt, env) = shadowed_x();
    assert_eq!(
        rt.find_binding("x", env).unwrap(),
        Some(Binding::new("x", num(2)))
    );
}

#[test]
fn arity_mismatch_in_both_directions() {
    init_logging();
    let mut rt = Runtime::new(256);

    let p = params(&mut rt, &["a", "b"]);
    let a = args(&mut rt, &[1]);
    assert_eq!(
        rt.make_frame(p, a).unwrap_err(),
        EnvError::ArityMismatch { procedure: None, parameters: 2, arguments: 1 }
    );

    let p = params(&mut rt, &["a"]);
    let a = args(&mut rt, &[1, 2]);
    assert_eq!(
        rt.make_frame(p, a).unwrap_err(),
        EnvError::ArityMismatch { procedure: None, parameters: 1, arguments: 2 }
    );

    let p = params(&mut rt, &["a", "b"]);
    let a = args(&mut rt, &[1, 2]);
    let frame = rt.make_frame(p, a).unwrap();
    assert_eq!(
        rt.frame_bindings(frame).unwrap(),
        vec![Binding::new("a", num(1)), Binding::new("b", num(2))]
    );
}

#[test]
fn arity_mismatch_names_the_procedure() {
    init_logging();
    let mut rt = Runtime::new(64);
    let p = params(&mut rt, &["n"]);
    let err = rt.make_frame_for("fact", p, Value::Nil).unwrap_err();
    assert_eq!(err.to_string(), "Arity mismatch in call to fact: expected 1 argument(s), got 0");
    assert_eq!(err.exit_code(), 4);
}

#[test]
fn empty_frame_changes_no_bindings() {
    let (mut rt, env) = shadowed_x();
    let frame = rt.make_frame(Value::Nil, Value::Nil).unwrap();
    assert!(frame.is_nil());

    let extended = rt.extend_environment(frame, env).unwrap();
    assert_eq!(rt.lookup_variable_value("x", extended).unwrap(), num(2));
    assert_eq!(
        environment_depth(&rt.heap, extended).unwrap(),
        environment_depth(&rt.heap, env).unwrap() + 1
    );
}

#[test]
fn initial_frame_preserves_order() {
    init_logging();
    let initial = [
        Binding::new("x", num(1)),
        Binding::new("y", num(2)),
        Binding::new("z", num(3)),
    ];
    let mut rt = Runtime::new(64);
    let env = rt.setup_environment(&initial).unwrap();

    assert_eq!(rt.lookup_variable_value("x", env).unwrap(), num(1));
    assert_eq!(rt.lookup_variable_value("y", env).unwrap(), num(2));
    assert_eq!(rt.lookup_variable_value("z", env).unwrap(), num(3));

    let frame = rt.first_frame(env).unwrap();
    let bindings = rt.frame_bindings(frame).unwrap();
    assert_eq!(bindings[0].variable, "x");
    assert_eq!(bindings, initial.to_vec());
}

#[test]
fn traversal_is_repeatable() {
    let (rt, env) = shadowed_x();
    let cells_before = rt.heap.total_cells();

    let f1 = rt.first_frame(env).unwrap();
    let f2 = rt.first_frame(env).unwrap();
    assert_eq!(f1, f2);

    let e1 = rt.enclosing_environment(env).unwrap();
    let e2 = rt.enclosing_environment(env).unwrap();
    assert_eq!(e1, e2);
    assert_eq!(rt.first_frame(e1).unwrap(), rt.first_frame(e2).unwrap());

    assert_eq!(rt.heap.total_cells(), cells_before);
}

#[test]
fn chain_ends_in_empty_environment() {
    let (rt, env) = shadowed_x();
    let global = rt.enclosing_environment(env).unwrap();
    let end = rt.enclosing_environment(global).unwrap();
    assert!(is_empty_environment(end));
    assert_eq!(end, EMPTY_ENVIRONMENT);
    assert!(matches!(rt.first_frame(end), Err(EnvError::Malformed(_))));
}

#[test]
fn sibling_environments_share_the_global_frame() {
    let (mut rt, _) = shadowed_x();
    let global = rt.global().unwrap();

    let p = params(&mut rt, &["y"]);
    let a = args(&mut rt, &[10]);
    let left = rt.extend_with(p, a, global).unwrap();

    let p = params(&mut rt, &["y"]);
    let a = args(&mut rt, &[20]);
    let right = rt.extend_with(p, a, global).unwrap();

    assert_eq!(rt.lookup_variable_value("y", left).unwrap(), num(10));
    assert_eq!(rt.lookup_variable_value("y", right).unwrap(), num(20));
    assert_eq!(rt.lookup_variable_value("x", left).unwrap(), num(1));
    assert_eq!(
        rt.enclosing_environment(left).unwrap(),
        rt.enclosing_environment(right).unwrap()
    );
}

#[test]
fn bound_values_are_shared_not_copied() {
    init_logging();
    let mut rt = Runtime::new(64);
    let list = rt.heap.list(&[num(1), num(2)]).unwrap();
    let env = rt.setup_environment(&[Binding::new("xs", list)]).unwrap();
    let cells = rt.heap.total_cells();
    assert_eq!(rt.lookup_variable_value("xs", env).unwrap(), list);
    assert_eq!(rt.heap.total_cells(), cells);
}

#[test]
fn heap_overflow_surfaces_during_setup() {
    init_logging();
    let config = Config::default()
        .with_heap_capacity(2)
        .with_binding(Binding::new("a", num(1)))
        .with_binding(Binding::new("b", num(2)));
    assert!(matches!(
        Runtime::from_config(&config),
        Err(EnvError::HeapOverflow(2))
    ));
}
