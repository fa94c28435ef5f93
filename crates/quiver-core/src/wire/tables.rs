//! Table definitions of the engine request schema.
//!
//! Laid out the way `flatc --rust` emits them: a read view per table
//! (`Follow` + `Verifiable`), an `*Args` struct and a `create` function
//! that adds fields in schema order.
//!
//! ```text
//! table VectorQuery { name:string; value:[ubyte]; min_score:double;
//!                     max_score:double; index_type:string; }
//! table RangeFilter { field:string; lower_value:[ubyte]; upper_value:[ubyte];
//!                     include_lower:bool; include_upper:bool; }
//! table TermFilter  { field:string; value:[ubyte]; is_union:int; }
//! table Request     { req_num:int; topn:int; brute_force_search:int;
//!                     fields:[string]; vec_fields:[VectorQuery];
//!                     range_filters:[RangeFilter]; term_filters:[TermFilter];
//!                     index_params:string; multi_vector_rank:int;
//!                     l2sqrt:bool; ranker:string; trace:bool; }
//! root_type Request;
//! ```

#![allow(missing_docs, clippy::needless_lifetimes)]

use flatbuffers::{
    FlatBufferBuilder, Follow, ForwardsUOffset, InvalidFlatbuffer, Table, VOffsetT, Vector,
    Verifiable, Verifier, WIPOffset,
};

// =========================================================================
// VectorQuery
// =========================================================================

/// Read view of a `VectorQuery` table.
#[derive(Copy, Clone, PartialEq)]
pub struct VectorQuery<'a> {
    _tab: Table<'a>,
}

impl<'a> Follow<'a> for VectorQuery<'a> {
    type Inner = VectorQuery<'a>;

    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self {
            _tab: Table::new(buf, loc),
        }
    }
}

impl<'a> VectorQuery<'a> {
    pub const VT_NAME: VOffsetT = 4;
    pub const VT_VALUE: VOffsetT = 6;
    pub const VT_MIN_SCORE: VOffsetT = 8;
    pub const VT_MAX_SCORE: VOffsetT = 10;
    pub const VT_INDEX_TYPE: VOffsetT = 12;

    /// Writes a `VectorQuery` table from already-written children.
    pub fn create<'bldr: 'args, 'args: 'mut_bldr, 'mut_bldr>(
        fbb: &'mut_bldr mut FlatBufferBuilder<'bldr>,
        args: &'args VectorQueryArgs<'args>,
    ) -> WIPOffset<VectorQuery<'bldr>> {
        let start = fbb.start_table();
        if let Some(x) = args.name {
            fbb.push_slot_always::<WIPOffset<_>>(Self::VT_NAME, x);
        }
        if let Some(x) = args.value {
            fbb.push_slot_always::<WIPOffset<_>>(Self::VT_VALUE, x);
        }
        fbb.push_slot::<f64>(Self::VT_MIN_SCORE, args.min_score, 0.0);
        fbb.push_slot::<f64>(Self::VT_MAX_SCORE, args.max_score, 0.0);
        if let Some(x) = args.index_type {
            fbb.push_slot_always::<WIPOffset<_>>(Self::VT_INDEX_TYPE, x);
        }
        let o = fbb.end_table(start);
        WIPOffset::new(o.value())
    }

    #[inline]
    pub fn name(&self) -> Option<&'a str> {
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(Self::VT_NAME, None) }
    }

    #[inline]
    pub fn value(&self) -> Option<Vector<'a, u8>> {
        unsafe { self._tab.get::<ForwardsUOffset<Vector<'a, u8>>>(Self::VT_VALUE, None) }
    }

    #[inline]
    pub fn min_score(&self) -> f64 {
        unsafe { self._tab.get::<f64>(Self::VT_MIN_SCORE, Some(0.0)).unwrap_or_default() }
    }

    #[inline]
    pub fn max_score(&self) -> f64 {
        unsafe { self._tab.get::<f64>(Self::VT_MAX_SCORE, Some(0.0)).unwrap_or_default() }
    }

    #[inline]
    pub fn index_type(&self) -> Option<&'a str> {
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(Self::VT_INDEX_TYPE, None) }
    }
}

impl Verifiable for VectorQuery<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<&str>>("name", Self::VT_NAME, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, u8>>>("value", Self::VT_VALUE, false)?
            .visit_field::<f64>("min_score", Self::VT_MIN_SCORE, false)?
            .visit_field::<f64>("max_score", Self::VT_MAX_SCORE, false)?
            .visit_field::<ForwardsUOffset<&str>>("index_type", Self::VT_INDEX_TYPE, false)?
            .finish();
        Ok(())
    }
}

/// Children and scalars of a `VectorQuery` table.
pub struct VectorQueryArgs<'a> {
    pub name: Option<WIPOffset<&'a str>>,
    pub value: Option<WIPOffset<Vector<'a, u8>>>,
    pub min_score: f64,
    pub max_score: f64,
    pub index_type: Option<WIPOffset<&'a str>>,
}

// =========================================================================
// RangeFilter
// =========================================================================

/// Read view of a `RangeFilter` table.
#[derive(Copy, Clone, PartialEq)]
pub struct RangeFilter<'a> {
    _tab: Table<'a>,
}

impl<'a> Follow<'a> for RangeFilter<'a> {
    type Inner = RangeFilter<'a>;

    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self {
            _tab: Table::new(buf, loc),
        }
    }
}

impl<'a> RangeFilter<'a> {
    pub const VT_FIELD: VOffsetT = 4;
    pub const VT_LOWER_VALUE: VOffsetT = 6;
    pub const VT_UPPER_VALUE: VOffsetT = 8;
    pub const VT_INCLUDE_LOWER: VOffsetT = 10;
    pub const VT_INCLUDE_UPPER: VOffsetT = 12;

    /// Writes a `RangeFilter` table from already-written children.
    pub fn create<'bldr: 'args, 'args: 'mut_bldr, 'mut_bldr>(
        fbb: &'mut_bldr mut FlatBufferBuilder<'bldr>,
        args: &'args RangeFilterArgs<'args>,
    ) -> WIPOffset<RangeFilter<'bldr>> {
        let start = fbb.start_table();
        if let Some(x) = args.field {
            fbb.push_slot_always::<WIPOffset<_>>(Self::VT_FIELD, x);
        }
        if let Some(x) = args.lower_value {
            fbb.push_slot_always::<WIPOffset<_>>(Self::VT_LOWER_VALUE, x);
        }
        if let Some(x) = args.upper_value {
            fbb.push_slot_always::<WIPOffset<_>>(Self::VT_UPPER_VALUE, x);
        }
        fbb.push_slot::<bool>(Self::VT_INCLUDE_LOWER, args.include_lower, false);
        fbb.push_slot::<bool>(Self::VT_INCLUDE_UPPER, args.include_upper, false);
        let o = fbb.end_table(start);
        WIPOffset::new(o.value())
    }

    #[inline]
    pub fn field(&self) -> Option<&'a str> {
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(Self::VT_FIELD, None) }
    }

    #[inline]
    pub fn lower_value(&self) -> Option<Vector<'a, u8>> {
        unsafe { self._tab.get::<ForwardsUOffset<Vector<'a, u8>>>(Self::VT_LOWER_VALUE, None) }
    }

    #[inline]
    pub fn upper_value(&self) -> Option<Vector<'a, u8>> {
        unsafe { self._tab.get::<ForwardsUOffset<Vector<'a, u8>>>(Self::VT_UPPER_VALUE, None) }
    }

    #[inline]
    pub fn include_lower(&self) -> bool {
        unsafe { self._tab.get::<bool>(Self::VT_INCLUDE_LOWER, Some(false)).unwrap_or_default() }
    }

    #[inline]
    pub fn include_upper(&self) -> bool {
        unsafe { self._tab.get::<bool>(Self::VT_INCLUDE_UPPER, Some(false)).unwrap_or_default() }
    }
}

impl Verifiable for RangeFilter<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<&str>>("field", Self::VT_FIELD, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, u8>>>("lower_value", Self::VT_LOWER_VALUE, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, u8>>>("upper_value", Self::VT_UPPER_VALUE, false)?
            .visit_field::<bool>("include_lower", Self::VT_INCLUDE_LOWER, false)?
            .visit_field::<bool>("include_upper", Self::VT_INCLUDE_UPPER, false)?
            .finish();
        Ok(())
    }
}

/// Children and scalars of a `RangeFilter` table.
pub struct RangeFilterArgs<'a> {
    pub field: Option<WIPOffset<&'a str>>,
    pub lower_value: Option<WIPOffset<Vector<'a, u8>>>,
    pub upper_value: Option<WIPOffset<Vector<'a, u8>>>,
    pub include_lower: bool,
    pub include_upper: bool,
}

// =========================================================================
// TermFilter
// =========================================================================

/// Read view of a `TermFilter` table.
#[derive(Copy, Clone, PartialEq)]
pub struct TermFilter<'a> {
    _tab: Table<'a>,
}

impl<'a> Follow<'a> for TermFilter<'a> {
    type Inner = TermFilter<'a>;

    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self {
            _tab: Table::new(buf, loc),
        }
    }
}

impl<'a> TermFilter<'a> {
    pub const VT_FIELD: VOffsetT = 4;
    pub const VT_VALUE: VOffsetT = 6;
    pub const VT_IS_UNION: VOffsetT = 8;

    /// Writes a `TermFilter` table from already-written children.
    pub fn create<'bldr: 'args, 'args: 'mut_bldr, 'mut_bldr>(
        fbb: &'mut_bldr mut FlatBufferBuilder<'bldr>,
        args: &'args TermFilterArgs<'args>,
    ) -> WIPOffset<TermFilter<'bldr>> {
        let start = fbb.start_table();
        if let Some(x) = args.field {
            fbb.push_slot_always::<WIPOffset<_>>(Self::VT_FIELD, x);
        }
        if let Some(x) = args.value {
            fbb.push_slot_always::<WIPOffset<_>>(Self::VT_VALUE, x);
        }
        fbb.push_slot::<i32>(Self::VT_IS_UNION, args.is_union, 0);
        let o = fbb.end_table(start);
        WIPOffset::new(o.value())
    }

    #[inline]
    pub fn field(&self) -> Option<&'a str> {
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(Self::VT_FIELD, None) }
    }

    #[inline]
    pub fn value(&self) -> Option<Vector<'a, u8>> {
        unsafe { self._tab.get::<ForwardsUOffset<Vector<'a, u8>>>(Self::VT_VALUE, None) }
    }

    #[inline]
    pub fn is_union(&self) -> i32 {
        unsafe { self._tab.get::<i32>(Self::VT_IS_UNION, Some(0)).unwrap_or_default() }
    }
}

impl Verifiable for TermFilter<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<&str>>("field", Self::VT_FIELD, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, u8>>>("value", Self::VT_VALUE, false)?
            .visit_field::<i32>("is_union", Self::VT_IS_UNION, false)?
            .finish();
        Ok(())
    }
}

/// Children and scalars of a `TermFilter` table.
pub struct TermFilterArgs<'a> {
    pub field: Option<WIPOffset<&'a str>>,
    pub value: Option<WIPOffset<Vector<'a, u8>>>,
    pub is_union: i32,
}

// =========================================================================
// Request
// =========================================================================

/// Read view of the root `Request` table.
#[derive(Copy, Clone, PartialEq)]
pub struct Request<'a> {
    _tab: Table<'a>,
}

impl<'a> Follow<'a> for Request<'a> {
    type Inner = Request<'a>;

    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self {
            _tab: Table::new(buf, loc),
        }
    }
}

impl<'a> Request<'a> {
    pub const VT_REQ_NUM: VOffsetT = 4;
    pub const VT_TOPN: VOffsetT = 6;
    pub const VT_BRUTE_FORCE_SEARCH: VOffsetT = 8;
    pub const VT_FIELDS: VOffsetT = 10;
    pub const VT_VEC_FIELDS: VOffsetT = 12;
    pub const VT_RANGE_FILTERS: VOffsetT = 14;
    pub const VT_TERM_FILTERS: VOffsetT = 16;
    pub const VT_INDEX_PARAMS: VOffsetT = 18;
    pub const VT_MULTI_VECTOR_RANK: VOffsetT = 20;
    pub const VT_L2SQRT: VOffsetT = 22;
    pub const VT_RANKER: VOffsetT = 24;
    pub const VT_TRACE: VOffsetT = 26;

    /// Writes the root `Request` table from already-written children.
    pub fn create<'bldr: 'args, 'args: 'mut_bldr, 'mut_bldr>(
        fbb: &'mut_bldr mut FlatBufferBuilder<'bldr>,
        args: &'args RequestArgs<'args>,
    ) -> WIPOffset<Request<'bldr>> {
        let start = fbb.start_table();
        fbb.push_slot::<i32>(Self::VT_REQ_NUM, args.req_num, 0);
        fbb.push_slot::<i32>(Self::VT_TOPN, args.topn, 0);
        fbb.push_slot::<i32>(Self::VT_BRUTE_FORCE_SEARCH, args.brute_force_search, 0);
        if let Some(x) = args.fields {
            fbb.push_slot_always::<WIPOffset<_>>(Self::VT_FIELDS, x);
        }
        if let Some(x) = args.vec_fields {
            fbb.push_slot_always::<WIPOffset<_>>(Self::VT_VEC_FIELDS, x);
        }
        if let Some(x) = args.range_filters {
            fbb.push_slot_always::<WIPOffset<_>>(Self::VT_RANGE_FILTERS, x);
        }
        if let Some(x) = args.term_filters {
            fbb.push_slot_always::<WIPOffset<_>>(Self::VT_TERM_FILTERS, x);
        }
        if let Some(x) = args.index_params {
            fbb.push_slot_always::<WIPOffset<_>>(Self::VT_INDEX_PARAMS, x);
        }
        fbb.push_slot::<i32>(Self::VT_MULTI_VECTOR_RANK, args.multi_vector_rank, 0);
        fbb.push_slot::<bool>(Self::VT_L2SQRT, args.l2sqrt, false);
        if let Some(x) = args.ranker {
            fbb.push_slot_always::<WIPOffset<_>>(Self::VT_RANKER, x);
        }
        fbb.push_slot::<bool>(Self::VT_TRACE, args.trace, false);
        let o = fbb.end_table(start);
        WIPOffset::new(o.value())
    }

    #[inline]
    pub fn req_num(&self) -> i32 {
        unsafe { self._tab.get::<i32>(Self::VT_REQ_NUM, Some(0)).unwrap_or_default() }
    }

    #[inline]
    pub fn topn(&self) -> i32 {
        unsafe { self._tab.get::<i32>(Self::VT_TOPN, Some(0)).unwrap_or_default() }
    }

    #[inline]
    pub fn brute_force_search(&self) -> i32 {
        unsafe { self._tab.get::<i32>(Self::VT_BRUTE_FORCE_SEARCH, Some(0)).unwrap_or_default() }
    }

    #[inline]
    pub fn fields(&self) -> Option<Vector<'a, ForwardsUOffset<&'a str>>> {
        unsafe {
            self._tab
                .get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<&'a str>>>>(Self::VT_FIELDS, None)
        }
    }

    #[inline]
    pub fn vec_fields(&self) -> Option<Vector<'a, ForwardsUOffset<VectorQuery<'a>>>> {
        unsafe {
            self._tab
                .get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<VectorQuery>>>>(Self::VT_VEC_FIELDS, None)
        }
    }

    #[inline]
    pub fn range_filters(&self) -> Option<Vector<'a, ForwardsUOffset<RangeFilter<'a>>>> {
        unsafe {
            self._tab
                .get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<RangeFilter>>>>(Self::VT_RANGE_FILTERS, None)
        }
    }

    #[inline]
    pub fn term_filters(&self) -> Option<Vector<'a, ForwardsUOffset<TermFilter<'a>>>> {
        unsafe {
            self._tab
                .get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<TermFilter>>>>(Self::VT_TERM_FILTERS, None)
        }
    }

    #[inline]
    pub fn index_params(&self) -> Option<&'a str> {
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(Self::VT_INDEX_PARAMS, None) }
    }

    #[inline]
    pub fn multi_vector_rank(&self) -> i32 {
        unsafe { self._tab.get::<i32>(Self::VT_MULTI_VECTOR_RANK, Some(0)).unwrap_or_default() }
    }

    #[inline]
    pub fn l2sqrt(&self) -> bool {
        unsafe { self._tab.get::<bool>(Self::VT_L2SQRT, Some(false)).unwrap_or_default() }
    }

    #[inline]
    pub fn ranker(&self) -> Option<&'a str> {
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(Self::VT_RANKER, None) }
    }

    #[inline]
    pub fn trace(&self) -> bool {
        unsafe { self._tab.get::<bool>(Self::VT_TRACE, Some(false)).unwrap_or_default() }
    }
}

impl Verifiable for Request<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<i32>("req_num", Self::VT_REQ_NUM, false)?
            .visit_field::<i32>("topn", Self::VT_TOPN, false)?
            .visit_field::<i32>("brute_force_search", Self::VT_BRUTE_FORCE_SEARCH, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<&'_ str>>>>("fields", Self::VT_FIELDS, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<VectorQuery>>>>(
                "vec_fields",
                Self::VT_VEC_FIELDS,
                false,
            )?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<RangeFilter>>>>(
                "range_filters",
                Self::VT_RANGE_FILTERS,
                false,
            )?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<TermFilter>>>>(
                "term_filters",
                Self::VT_TERM_FILTERS,
                false,
            )?
            .visit_field::<ForwardsUOffset<&str>>("index_params", Self::VT_INDEX_PARAMS, false)?
            .visit_field::<i32>("multi_vector_rank", Self::VT_MULTI_VECTOR_RANK, false)?
            .visit_field::<bool>("l2sqrt", Self::VT_L2SQRT, false)?
            .visit_field::<ForwardsUOffset<&str>>("ranker", Self::VT_RANKER, false)?
            .visit_field::<bool>("trace", Self::VT_TRACE, false)?
            .finish();
        Ok(())
    }
}

/// Children and scalars of the root `Request` table.
pub struct RequestArgs<'a> {
    pub req_num: i32,
    pub topn: i32,
    pub brute_force_search: i32,
    pub fields: Option<WIPOffset<Vector<'a, ForwardsUOffset<&'a str>>>>,
    pub vec_fields: Option<WIPOffset<Vector<'a, ForwardsUOffset<VectorQuery<'a>>>>>,
    pub range_filters: Option<WIPOffset<Vector<'a, ForwardsUOffset<RangeFilter<'a>>>>>,
    pub term_filters: Option<WIPOffset<Vector<'a, ForwardsUOffset<TermFilter<'a>>>>>,
    pub index_params: Option<WIPOffset<&'a str>>,
    pub multi_vector_rank: i32,
    pub l2sqrt: bool,
    pub ranker: Option<WIPOffset<&'a str>>,
    pub trace: bool,
}
