//! Constructors for commonly built nodes.

use super::*;
use crate::types::{BOOL_OID, INT4_OID, INVALID_OID, Oid};

pub fn make_var(rtindex: u32, attno: i16, type_oid: Oid, typmod: i32, collation: Oid, levels_up: u32) -> Node {
    Var {
        rtindex,
        attno,
        type_oid,
        typmod,
        collation,
        levels_up,
        location: None,
    }
    .into()
}

pub fn make_const(type_oid: Oid, typmod: i32, collation: Oid, len: i32, value: Datum, by_val: bool) -> Node {
    Const {
        type_oid,
        typmod,
        collation,
        len,
        by_val,
        value,
        location: None,
    }
    .into()
}

pub fn make_int4_const(value: i32) -> Node {
    make_const(INT4_OID, -1, INVALID_OID, 4, Datum::Int4(value), true)
}

pub fn make_bool_const(value: bool) -> Node {
    make_const(BOOL_OID, -1, INVALID_OID, 1, Datum::Bool(value), true)
}

/// NULL constant of the given type
pub fn make_null_const(type_oid: Oid, typmod: i32, collation: Oid) -> Node {
    make_const(type_oid, typmod, collation, -1, Datum::Null, false)
}

pub fn make_relabel_type(arg: Node, result_type: Oid, typmod: i32, collation: Oid, format: CoercionForm) -> Node {
    RelabelType {
        arg,
        result_type,
        typmod,
        collation,
        format,
        location: None,
    }
    .into()
}

pub fn make_target_entry(expr: Node, resno: i16, name: Option<&str>, junk: bool) -> Node {
    TargetEntry {
        expr,
        resno,
        name: name.map(str::to_string),
        sort_group_ref: 0,
        orig_table: INVALID_OID,
        orig_column: 0,
        junk,
    }
    .into()
}

pub fn make_func_expr(
    func_oid: Oid,
    result_type: Oid,
    args: Vec<Node>,
    collation: Oid,
    input_collation: Oid,
    format: CoercionForm,
) -> Node {
    FuncExpr {
        func_oid,
        result_type,
        returns_set: false,
        variadic: false,
        format,
        collation,
        input_collation,
        args,
        location: None,
    }
    .into()
}

/// Binary operator application with no collation
pub fn make_op_expr(op_oid: Oid, func_oid: Oid, result_type: Oid, left: Node, right: Node) -> Node {
    OpExpr {
        op_oid,
        func_oid,
        result_type,
        returns_set: false,
        collation: INVALID_OID,
        input_collation: INVALID_OID,
        args: vec![left, right],
        location: None,
    }
    .into()
}

pub fn make_bool_expr(op: BoolExprType, args: Vec<Node>, location: Location) -> Node {
    BoolExpr { op, args, location }.into()
}

/// AND the given quals together, flattening to the single qual when only one
/// remains
pub fn make_and_qual(left: Option<Node>, right: Option<Node>) -> Option<Node> {
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (Some(left), Some(right)) => Some(make_bool_expr(BoolExprType::And, vec![left, right], None)),
    }
}

pub fn make_alias(name: &str, colnames: &[&str]) -> Alias {
    Alias {
        name: name.to_string(),
        colnames: colnames.iter().map(|c| c.to_string()).collect(),
    }
}
