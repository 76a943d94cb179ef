pub mod makefuncs;
pub mod parsenodes;
pub mod primnodes;
pub mod rawnodes;

use serde::{Deserialize, Serialize};

pub use parsenodes::*;
pub use primnodes::*;
pub use rawnodes::*;

/// Byte offset into the source text, `None` when unknown
pub type Location = Option<usize>;

/// Declares a node enum whose variants box their payload, together with its
/// kind tag enum. Every node enum also has an unboxed `List` variant.
macro_rules! node_kinds {
    (
        $(#[$meta:meta])*
        $node:ident / $tag:ident {
            $( $variant:ident($payload:ty) ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub enum $node {
            $( $variant(Box<$payload>), )*
            List(Vec<$node>),
        }

        /// Kind discriminant of a node
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $tag {
            $( $variant, )*
            List,
        }

        impl $node {
            pub fn tag(&self) -> $tag {
                match self {
                    $( $node::$variant(_) => $tag::$variant, )*
                    $node::List(_) => $tag::List,
                }
            }
        }

        impl $tag {
            pub fn name(&self) -> &'static str {
                match self {
                    $( $tag::$variant => stringify!($variant), )*
                    $tag::List => "List",
                }
            }
        }

        impl std::fmt::Display for $tag {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

/// `From<Payload>` for payload types owned by exactly one variant
macro_rules! payload_from {
    ($node:ident: $( $variant:ident($payload:ty) ),* $(,)?) => {
        $(
            impl From<$payload> for $node {
                fn from(payload: $payload) -> Self {
                    $node::$variant(Box::new(payload))
                }
            }
        )*
    };
}

node_kinds! {
    /// A node of an analyzed tree: expressions, queries and their clauses
    Node / NodeTag {
        Var(Var),
        Const(Const),
        Param(Param),
        Aggref(Aggref),
        GroupingFunc(GroupingFunc),
        WindowFunc(WindowFunc),
        ArrayRef(ArrayRef),
        FuncExpr(FuncExpr),
        NamedArgExpr(NamedArgExpr),
        OpExpr(OpExpr),
        DistinctExpr(OpExpr),
        NullIfExpr(OpExpr),
        ScalarArrayOpExpr(ScalarArrayOpExpr),
        BoolExpr(BoolExpr),
        SubLink(SubLink),
        FieldSelect(FieldSelect),
        FieldStore(FieldStore),
        RelabelType(RelabelType),
        CoerceViaIO(CoerceViaIO),
        ArrayCoerceExpr(ArrayCoerceExpr),
        ConvertRowtypeExpr(ConvertRowtypeExpr),
        CollateExpr(CollateExpr),
        CaseExpr(CaseExpr),
        CaseTestExpr(CaseTestExpr),
        ArrayExpr(ArrayExpr),
        RowExpr(RowExpr),
        RowCompareExpr(RowCompareExpr),
        CoalesceExpr(CoalesceExpr),
        MinMaxExpr(MinMaxExpr),
        XmlExpr(XmlExpr),
        NullTest(NullTest),
        BooleanTest(BooleanTest),
        CoerceToDomain(CoerceToDomain),
        CoerceToDomainValue(CoerceToDomainValue),
        SetToDefault(SetToDefault),
        CurrentOfExpr(CurrentOfExpr),
        InferenceElem(InferenceElem),
        TargetEntry(TargetEntry),
        RangeTblRef(RangeTblRef),
        JoinExpr(JoinExpr),
        FromExpr(FromExpr),
        OnConflictExpr(OnConflictExpr),
        SetOperationStmt(SetOperationStmt),
        SortGroupClause(SortGroupClause),
        WindowClause(WindowClause),
        WithCheckOption(WithCheckOption),
        CommonTableExpr(CommonTableExpr),
        RangeTblFunction(RangeTblFunction),
        TableSampleClause(TableSampleClause),
        Query(Query),
        RangeTblEntry(RangeTblEntry),
    }
}

payload_from! {
    Node:
    Var(Var),
    Const(Const),
    Param(Param),
    Aggref(Aggref),
    GroupingFunc(GroupingFunc),
    WindowFunc(WindowFunc),
    ArrayRef(ArrayRef),
    FuncExpr(FuncExpr),
    NamedArgExpr(NamedArgExpr),
    OpExpr(OpExpr),
    ScalarArrayOpExpr(ScalarArrayOpExpr),
    BoolExpr(BoolExpr),
    SubLink(SubLink),
    FieldSelect(FieldSelect),
    FieldStore(FieldStore),
    RelabelType(RelabelType),
    CoerceViaIO(CoerceViaIO),
    ArrayCoerceExpr(ArrayCoerceExpr),
    ConvertRowtypeExpr(ConvertRowtypeExpr),
    CollateExpr(CollateExpr),
    CaseExpr(CaseExpr),
    CaseTestExpr(CaseTestExpr),
    ArrayExpr(ArrayExpr),
    RowExpr(RowExpr),
    RowCompareExpr(RowCompareExpr),
    CoalesceExpr(CoalesceExpr),
    MinMaxExpr(MinMaxExpr),
    XmlExpr(XmlExpr),
    NullTest(NullTest),
    BooleanTest(BooleanTest),
    CoerceToDomain(CoerceToDomain),
    CoerceToDomainValue(CoerceToDomainValue),
    SetToDefault(SetToDefault),
    CurrentOfExpr(CurrentOfExpr),
    InferenceElem(InferenceElem),
    TargetEntry(TargetEntry),
    RangeTblRef(RangeTblRef),
    JoinExpr(JoinExpr),
    FromExpr(FromExpr),
    OnConflictExpr(OnConflictExpr),
    SetOperationStmt(SetOperationStmt),
    SortGroupClause(SortGroupClause),
    WindowClause(WindowClause),
    WithCheckOption(WithCheckOption),
    CommonTableExpr(CommonTableExpr),
    RangeTblFunction(RangeTblFunction),
    TableSampleClause(TableSampleClause),
    Query(Query),
    RangeTblEntry(RangeTblEntry),
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::List(items)
    }
}

impl Node {
    /// True for the kinds that produce a value and carry expression
    /// attributes (type, typmod, collation)
    pub fn is_expr(&self) -> bool {
        self.tag().is_expr()
    }

    pub fn is_query(&self) -> bool {
        matches!(self, Node::Query(_))
    }

    pub fn as_query(&self) -> Option<&Query> {
        match self {
            Node::Query(query) => Some(query),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_target_entry(&self) -> Option<&TargetEntry> {
        match self {
            Node::TargetEntry(tle) => Some(tle),
            _ => None,
        }
    }
}

impl NodeTag {
    pub fn is_expr(&self) -> bool {
        match self {
            NodeTag::Var
            | NodeTag::Const
            | NodeTag::Param
            | NodeTag::Aggref
            | NodeTag::GroupingFunc
            | NodeTag::WindowFunc
            | NodeTag::ArrayRef
            | NodeTag::FuncExpr
            | NodeTag::NamedArgExpr
            | NodeTag::OpExpr
            | NodeTag::DistinctExpr
            | NodeTag::NullIfExpr
            | NodeTag::ScalarArrayOpExpr
            | NodeTag::BoolExpr
            | NodeTag::SubLink
            | NodeTag::FieldSelect
            | NodeTag::FieldStore
            | NodeTag::RelabelType
            | NodeTag::CoerceViaIO
            | NodeTag::ArrayCoerceExpr
            | NodeTag::ConvertRowtypeExpr
            | NodeTag::CollateExpr
            | NodeTag::CaseExpr
            | NodeTag::CaseTestExpr
            | NodeTag::ArrayExpr
            | NodeTag::RowExpr
            | NodeTag::RowCompareExpr
            | NodeTag::CoalesceExpr
            | NodeTag::MinMaxExpr
            | NodeTag::XmlExpr
            | NodeTag::NullTest
            | NodeTag::BooleanTest
            | NodeTag::CoerceToDomain
            | NodeTag::CoerceToDomainValue
            | NodeTag::SetToDefault
            | NodeTag::CurrentOfExpr
            | NodeTag::InferenceElem => true,
            NodeTag::TargetEntry
            | NodeTag::RangeTblRef
            | NodeTag::JoinExpr
            | NodeTag::FromExpr
            | NodeTag::OnConflictExpr
            | NodeTag::SetOperationStmt
            | NodeTag::SortGroupClause
            | NodeTag::WindowClause
            | NodeTag::WithCheckOption
            | NodeTag::CommonTableExpr
            | NodeTag::RangeTblFunction
            | NodeTag::TableSampleClause
            | NodeTag::Query
            | NodeTag::RangeTblEntry
            | NodeTag::List => false,
        }
    }
}

node_kinds! {
    /// A node of a raw parse tree, before analysis resolves names and types
    RawNode / RawNodeTag {
        Value(Value),
        ParamRef(ParamRef),
        AConst(AConst),
        AStar(AStar),
        Alias(Alias),
        RangeVar(RangeVar),
        GroupingFunc(RawGroupingFunc),
        SubLink(RawSubLink),
        CaseExpr(RawCaseExpr),
        RowExpr(RawRowExpr),
        CoalesceExpr(RawCoalesceExpr),
        MinMaxExpr(RawMinMaxExpr),
        XmlExpr(RawXmlExpr),
        NullTest(RawNullTest),
        BooleanTest(RawBooleanTest),
        JoinExpr(RawJoinExpr),
        IntoClause(IntoClause),
        InsertStmt(InsertStmt),
        DeleteStmt(DeleteStmt),
        UpdateStmt(UpdateStmt),
        SelectStmt(SelectStmt),
        AExpr(AExpr),
        ColumnRef(ColumnRef),
        FuncCall(FuncCall),
        NamedArgExpr(RawNamedArgExpr),
        AIndices(AIndices),
        AIndirection(AIndirection),
        AArrayExpr(AArrayExpr),
        ResTarget(ResTarget),
        MultiAssignRef(MultiAssignRef),
        TypeCast(TypeCast),
        CollateClause(CollateClause),
        SortBy(SortBy),
        WindowDef(WindowDef),
        RangeSubselect(RangeSubselect),
        RangeFunction(RangeFunction),
        RangeTableSample(RangeTableSample),
        TypeName(TypeName),
        ColumnDef(ColumnDef),
        IndexElem(IndexElem),
        GroupingSet(GroupingSet),
        LockingClause(LockingClause),
        XmlSerialize(XmlSerialize),
        WithClause(WithClause),
        InferClause(InferClause),
        OnConflictClause(OnConflictClause),
        CommonTableExpr(RawCommonTableExpr),
        SetToDefault(SetToDefault),
        CurrentOfExpr(CurrentOfExpr),
    }
}

payload_from! {
    RawNode:
    Value(Value),
    ParamRef(ParamRef),
    AConst(AConst),
    AStar(AStar),
    Alias(Alias),
    RangeVar(RangeVar),
    GroupingFunc(RawGroupingFunc),
    SubLink(RawSubLink),
    CaseExpr(RawCaseExpr),
    RowExpr(RawRowExpr),
    CoalesceExpr(RawCoalesceExpr),
    MinMaxExpr(RawMinMaxExpr),
    XmlExpr(RawXmlExpr),
    NullTest(RawNullTest),
    BooleanTest(RawBooleanTest),
    JoinExpr(RawJoinExpr),
    IntoClause(IntoClause),
    InsertStmt(InsertStmt),
    DeleteStmt(DeleteStmt),
    UpdateStmt(UpdateStmt),
    SelectStmt(SelectStmt),
    AExpr(AExpr),
    ColumnRef(ColumnRef),
    FuncCall(FuncCall),
    NamedArgExpr(RawNamedArgExpr),
    AIndices(AIndices),
    AIndirection(AIndirection),
    AArrayExpr(AArrayExpr),
    ResTarget(ResTarget),
    MultiAssignRef(MultiAssignRef),
    TypeCast(TypeCast),
    CollateClause(CollateClause),
    SortBy(SortBy),
    WindowDef(WindowDef),
    RangeSubselect(RangeSubselect),
    RangeFunction(RangeFunction),
    RangeTableSample(RangeTableSample),
    TypeName(TypeName),
    ColumnDef(ColumnDef),
    IndexElem(IndexElem),
    GroupingSet(GroupingSet),
    LockingClause(LockingClause),
    XmlSerialize(XmlSerialize),
    WithClause(WithClause),
    InferClause(InferClause),
    OnConflictClause(OnConflictClause),
    CommonTableExpr(RawCommonTableExpr),
    SetToDefault(SetToDefault),
    CurrentOfExpr(CurrentOfExpr),
}

impl From<Vec<RawNode>> for RawNode {
    fn from(items: Vec<RawNode>) -> Self {
        RawNode::List(items)
    }
}
