//! Small programs with known slices

use codegraph_sdg::shared::models::RETURN_VARIABLE;
use codegraph_sdg::{
    Argument, CallSite, NodeId, Program, ProgramBuilder, SdgConfig, Signature,
    SystemDependenceGraph, VariableAction,
};

pub fn build(program: Program) -> SystemDependenceGraph {
    build_with(program, SdgConfig::default())
}

pub fn build_with(program: Program, config: SdgConfig) -> SystemDependenceGraph {
    let mut sdg = SystemDependenceGraph::new(config);
    sdg.build(program).expect("fixture builds");
    sdg
}

fn def(v: &str) -> VariableAction {
    VariableAction::definition(v)
}

fn usage(v: &str) -> VariableAction {
    VariableAction::usage(v)
}

/// `f(x) { y = 1; if (x > 0) y = 2; print(y); z = 3; }`
pub struct Branching {
    pub program: Program,
    pub entry: NodeId,
    pub y1: NodeId,
    pub cond: NodeId,
    pub y2: NodeId,
    pub print: NodeId,
    pub unrelated: NodeId,
}

pub fn branching() -> Branching {
    let mut program = ProgramBuilder::new();
    let mut f = program.procedure("f", Signature::new().parameter("x"));
    let y1 = f.statement("y = 1", [def("y")]);
    let cond = f.statement("if (x > 0)", [usage("x")]);
    let y2 = f.statement("y = 2", [def("y")]);
    let print = f.statement("print(y)", [usage("y")]);
    let unrelated = f.statement("z = 3", [def("z")]);
    let (entry, exit) = (f.entry(), f.exit());
    f.chain(&[entry, y1, cond, y2, print, unrelated, exit]);
    f.flow(cond, print);
    for (node, line) in [(y1, 1), (cond, 2), (y2, 2), (print, 3), (unrelated, 4)] {
        f.set_line(node, line).expect("own node");
    }
    f.finish().expect("valid cfg");
    Branching {
        program: program.build(),
        entry,
        y1,
        cond,
        y2,
        print,
        unrelated,
    }
}

/// `w = 5; if (false) { z = 1; } print(w);`
pub struct DeadBranch {
    pub program: Program,
    pub entry: NodeId,
    pub w: NodeId,
    pub cond: NodeId,
    pub z: NodeId,
    pub print: NodeId,
}

pub fn dead_branch() -> DeadBranch {
    let mut program = ProgramBuilder::new();
    let mut f = program.procedure("f", Signature::new());
    let w = f.statement("w = 5", [def("w")]);
    let cond = f.statement("if (false)", []);
    let z = f.statement("z = 1", [def("z")]);
    let print = f.statement("print(w)", [usage("w")]);
    let (entry, exit) = (f.entry(), f.exit());
    f.chain(&[entry, w, cond, z, print, exit]);
    f.flow(cond, print);
    f.finish().expect("valid cfg");
    DeadBranch {
        program: program.build(),
        entry,
        w,
        cond,
        z,
        print,
    }
}

/// ```text
/// add(a, b) { s = a + b; return s; }
/// bump(inout c) { c = c + 1; }
/// main() { x = 1; u = 2; k = 0; t = add(x, u); bump(k); print(t); print(k); }
/// ```
pub struct Interprocedural {
    pub program: Program,
    pub add_sum: NodeId,
    pub add_return: NodeId,
    pub bump_body: NodeId,
    pub x: NodeId,
    pub u: NodeId,
    pub k: NodeId,
    pub call_add: NodeId,
    pub call_bump: NodeId,
    pub print_t: NodeId,
    pub print_k: NodeId,
}

pub fn interprocedural() -> Interprocedural {
    let mut program = ProgramBuilder::new();

    let mut add = program.procedure("add", Signature::new().parameter("a").parameter("b").returns());
    let add_sum = add.statement("s = a + b", [usage("a"), usage("b"), def("s")]);
    let add_return = add.statement("return s", [usage("s"), def(RETURN_VARIABLE)]);
    let (entry, exit) = (add.entry(), add.exit());
    add.chain(&[entry, add_sum, add_return, exit]);
    add.finish().expect("valid cfg");

    let mut bump = program.procedure("bump", Signature::new().in_out("c"));
    let bump_body = bump.statement("c = c + 1", [usage("c"), def("c")]);
    let (entry, exit) = (bump.entry(), bump.exit());
    bump.chain(&[entry, bump_body, exit]);
    bump.finish().expect("valid cfg");

    let mut main = program.procedure("main", Signature::new());
    let x = main.statement("x = 1", [def("x")]);
    let u = main.statement("u = 2", [def("u")]);
    let k = main.statement("k = 0", [def("k")]);
    let call_add = main.statement("t = add(x, u)", [def("t")]);
    main.call(
        call_add,
        CallSite::new("add")
            .argument(Argument::variable("x"))
            .argument(Argument::variable("u"))
            .using_result(),
    )
    .expect("own node");
    let call_bump = main.statement("bump(k)", []);
    main.call(call_bump, CallSite::new("bump").argument(Argument::variable("k")))
        .expect("own node");
    let print_t = main.statement("print(t)", [usage("t")]);
    let print_k = main.statement("print(k)", [usage("k")]);
    let (entry, exit) = (main.entry(), main.exit());
    main.chain(&[entry, x, u, k, call_add, call_bump, print_t, print_k, exit]);
    main.finish().expect("valid cfg");

    Interprocedural {
        program: program.build(),
        add_sum,
        add_return,
        bump_body,
        x,
        u,
        k,
        call_add,
        call_bump,
        print_t,
        print_k,
    }
}

/// ```text
/// fact(n) { if (n <= 1) return 1; r = n * fact(n - 1); return r; }
/// main() { m = fact(5); print(m); }
/// ```
pub struct Recursive {
    pub program: Program,
    pub cond: NodeId,
    pub base: NodeId,
    pub step: NodeId,
    pub ret: NodeId,
    pub call: NodeId,
    pub print: NodeId,
}

pub fn recursive() -> Recursive {
    let mut program = ProgramBuilder::new();

    let mut fact = program.procedure("fact", Signature::new().parameter("n").returns());
    let cond = fact.statement("if (n <= 1)", [usage("n")]);
    let base = fact.statement("return 1", [def(RETURN_VARIABLE)]);
    let step = fact.statement("r = n * fact(n - 1)", [usage("n"), def("r")]);
    fact.call(
        step,
        CallSite::new("fact")
            .argument(Argument::expression("n - 1", &["n"]))
            .at(1)
            .using_result(),
    )
    .expect("own node");
    let ret = fact.statement("return r", [usage("r"), def(RETURN_VARIABLE)]);
    let (entry, exit) = (fact.entry(), fact.exit());
    fact.chain(&[entry, cond, base, exit]);
    fact.chain(&[cond, step, ret, exit]);
    fact.finish().expect("valid cfg");

    let mut main = program.procedure("main", Signature::new());
    let call = main.statement("m = fact(5)", [def("m")]);
    main.call(
        call,
        CallSite::new("fact")
            .argument(Argument::expression("5", &[]))
            .using_result(),
    )
    .expect("own node");
    let print = main.statement("print(m)", [usage("m")]);
    let (entry, exit) = (main.entry(), main.exit());
    main.chain(&[entry, call, print, exit]);
    main.finish().expect("valid cfg");

    Recursive {
        program: program.build(),
        cond,
        base,
        step,
        ret,
        call,
        print,
    }
}

/// ```text
/// g(n) { i = 0; while (i < n) { if (i == 5) break; i = i + 1; } print(i); }
/// ```
pub struct BreakLoop {
    pub program: Program,
    pub init: NodeId,
    pub head: NodeId,
    pub test: NodeId,
    pub jump: NodeId,
    pub step: NodeId,
    pub print: NodeId,
}

pub fn break_loop() -> BreakLoop {
    let mut program = ProgramBuilder::new();
    let mut g = program.procedure("g", Signature::new().parameter("n"));
    let init = g.statement("i = 0", [def("i")]);
    let head = g.statement("while (i < n)", [usage("i"), usage("n")]);
    let test = g.statement("if (i == 5)", [usage("i")]);
    let jump = g.statement("break", []);
    let step = g.statement("i = i + 1", [usage("i"), def("i")]);
    let print = g.statement("print(i)", [usage("i")]);
    let (entry, exit) = (g.entry(), g.exit());
    g.chain(&[entry, init, head, test, jump, print, exit]);
    g.non_executable(jump, step);
    g.flow(test, step).flow(step, head).flow(head, print);
    g.finish().expect("valid cfg");
    BreakLoop {
        program: program.build(),
        init,
        head,
        test,
        jump,
        step,
        print,
    }
}

/// `h(c) { if (c) { while (true) { a = 1; } } b = 2; }`
pub struct InfiniteLoop {
    pub program: Program,
    pub entry: NodeId,
    pub cond: NodeId,
    pub head: NodeId,
    pub body: NodeId,
    pub after: NodeId,
}

pub fn infinite_loop() -> InfiniteLoop {
    let mut program = ProgramBuilder::new();
    let mut h = program.procedure("h", Signature::new().parameter("c"));
    let cond = h.statement("if (c)", [usage("c")]);
    let head = h.statement("while (true)", []);
    let body = h.statement("a = 1", [def("a")]);
    let after = h.statement("b = 2", [def("b")]);
    let (entry, exit) = (h.entry(), h.exit());
    h.chain(&[entry, cond, head, body, head]);
    h.chain(&[cond, after, exit]);
    h.finish().expect("valid cfg");
    InfiniteLoop {
        program: program.build(),
        entry,
        cond,
        head,
        body,
        after,
    }
}
