//! The frame-stack machine that drives tree construction.

use smallvec::SmallVec;
use spl_ir::ast::{GROUP_PRECEDENCE, RETURN_PRECEDENCE};
use spl_ir::{
    is_reserved_word, AssignOp, BinaryOp, DeclKind, Expr, ExprArena, ExprId, ExprKind, Name,
    Param, Program, ScopeShape, Span, StringInterner, Token, TokenKind, TokenList, UnaryOp,
    VarRef,
};
use tracing::{debug, trace};

use crate::assemble::assemble;
use crate::frame::{Construct, Frame, FrameKind, Item, RunItem};
use crate::{ParseError, ParseErrorKind};

type ParseResult<T = ()> = Result<T, ParseError>;

/// Single-pass tree builder.
///
/// Owns the arena being filled and the counter used to name anonymous
/// functions, so independent builds never share naming state.
pub struct AstBuilder<'a> {
    tokens: &'a [Token],
    pos: usize,
    interner: &'a StringInterner,
    arena: ExprArena,
    frames: Vec<Frame>,
    /// Token before the one being handled, for classifying `-`.
    prev: Option<Token>,
    current: Option<Token>,
    /// Index of the token after the `)` that last closed a condition.
    condition_end: Option<usize>,
    /// Index of the token after the `)` that last closed a call.
    call_end: Option<usize>,
    anon_counter: u32,
}

impl<'a> AstBuilder<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        AstBuilder {
            tokens: tokens.as_slice(),
            pos: 0,
            interner,
            arena: ExprArena::new(),
            frames: vec![Frame::new(FrameKind::Root, Span::DUMMY)],
            prev: None,
            current: None,
            condition_end: None,
            call_end: None,
            anon_counter: 0,
        }
    }

    /// Consume the token stream and return the finished program.
    pub fn build(mut self) -> ParseResult<Program> {
        while let Some(token) = self.next_token() {
            if token.kind == TokenKind::Eof {
                break;
            }
            self.step(token)?;
        }
        self.finish()
    }

    // Token access

    fn next_token(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).copied()?;
        self.pos += 1;
        self.prev = self.current;
        self.current = Some(token);
        Some(token)
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn text(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    fn peek_text(&self) -> Option<&'static str> {
        self.peek().and_then(|t| t.kind.ident()).map(|name| self.text(name))
    }

    fn is_identifier(text: &str) -> bool {
        text.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') && !is_reserved_word(text)
    }

    // Frame access

    fn frame(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    fn frame_ref(&self) -> &Frame {
        &self.frames[self.frames.len() - 1]
    }

    fn push_frame(&mut self, kind: FrameKind, span: Span) {
        trace!(?kind, depth = self.frames.len(), "open frame");
        self.frames.push(Frame::new(kind, span));
    }

    fn pop_frame(&mut self) -> Frame {
        let frame = self.frames.pop().unwrap_or_else(|| Frame::new(FrameKind::Root, Span::DUMMY));
        trace!(kind = ?frame.kind, depth = self.frames.len(), "close frame");
        frame
    }

    fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    fn span_of(&self, id: ExprId) -> Span {
        self.arena.get_expr(id).span
    }

    fn push_operand(&mut self, kind: ExprKind, span: Span) {
        let id = self.alloc(kind, span);
        self.frame().items.push(Item::Run(RunItem::Operand(id)));
    }

    /// Effective precedence of an operator pushed into the current frame.
    fn effective(&self, base: u32) -> u32 {
        let depth = u32::try_from(self.frame_ref().groups.len()).unwrap_or(u32::MAX);
        base.saturating_add(depth.saturating_mul(GROUP_PRECEDENCE))
    }

    // Dispatch

    fn step(&mut self, token: Token) -> ParseResult {
        let span = token.span;
        match token.kind {
            TokenKind::Int(v) => self.push_operand(ExprKind::Int(v), span),
            TokenKind::Float(bits) => self.push_operand(ExprKind::Float(bits), span),
            TokenKind::Literal(name) => self.push_operand(ExprKind::Str(name), span),
            TokenKind::EndOfStatement => self.semicolon(span)?,
            TokenKind::Eof => {}
            TokenKind::Ident(name) => self.word(name, span)?,
        }
        Ok(())
    }

    fn word(&mut self, name: Name, span: Span) -> ParseResult {
        let text = self.text(name);
        match text {
            "(" => self.open_paren(span),
            ")" => self.close_paren(span)?,
            "{" => {
                self.close_expression()?;
                self.push_frame(FrameKind::Block, span);
            }
            "}" => self.close_block(span)?,
            "," => self.comma(span)?,
            "=" => self.assign(span)?,
            "if" => self.construct(Construct::If, "if", span)?,
            "while" => self.construct(Construct::While, "while", span)?,
            "for" => self.construct(Construct::For, "for", span)?,
            "else" => self.else_branch(span)?,
            "def" | "function" => self.def(text, span)?,
            "var" | "let" => self.declaration(DeclKind::Var, span)?,
            "const" => self.declaration(DeclKind::Const, span)?,
            "return" => {
                let prec = self.effective(RETURN_PRECEDENCE);
                self.frame().items.push(Item::Run(RunItem::Return { prec, span }));
            }
            "break" => self.push_operand(ExprKind::Break, span),
            "continue" => self.push_operand(ExprKind::Continue, span),
            "true" => self.push_operand(ExprKind::Bool(true), span),
            "false" => self.push_operand(ExprKind::Bool(false), span),
            "null" => self.push_operand(ExprKind::Null, span),
            "-" if self.minus_is_unary() => self.unary(UnaryOp::Neg, span),
            _ if is_reserved_word(text) => {
                return Err(ParseError::new(
                    ParseErrorKind::Unsupported(text.to_owned()),
                    span,
                ));
            }
            _ => {
                if let Some(op) = UnaryOp::from_symbol(text) {
                    self.unary(op, span);
                } else if let Some(op) = BinaryOp::from_symbol(text) {
                    let prec = self.effective(op.precedence());
                    self.frame().items.push(Item::Run(RunItem::Binary { op, prec, span }));
                } else if let Some(op) = AssignOp::from_symbol(text) {
                    let prec = self.effective(op.precedence());
                    self.frame().items.push(Item::Run(RunItem::Compound { op, prec, span }));
                } else if Self::is_identifier(text) {
                    self.push_operand(
                        ExprKind::Ident {
                            name,
                            var: VarRef::UNRESOLVED,
                        },
                        span,
                    );
                } else {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedToken(text.to_owned()),
                        span,
                    ));
                }
            }
        }
        Ok(())
    }

    fn unary(&mut self, op: UnaryOp, span: Span) {
        let prec = self.effective(op.precedence());
        self.frame().items.push(Item::Run(RunItem::Unary { op, prec, span }));
    }

    /// Whether the token being handled directly follows the `)` recorded in
    /// `end`.
    fn follows(&self, end: Option<usize>) -> bool {
        end.is_some_and(|index| index + 1 == self.pos)
    }

    /// `-` is binary only after something that ends an operand. The `)` of
    /// an `if`/`while`/`for` header starts a body instead.
    fn minus_is_unary(&self) -> bool {
        let Some(prev) = self.prev else {
            return true;
        };
        if self.follows(self.condition_end) {
            return true;
        }
        match prev.kind {
            TokenKind::Int(_) | TokenKind::Float(_) | TokenKind::Literal(_) => false,
            TokenKind::EndOfStatement | TokenKind::Eof => true,
            TokenKind::Ident(name) => {
                let text = self.text(name);
                !(matches!(text, ")" | "]" | "true" | "false" | "null")
                    || Self::is_identifier(text))
            }
        }
    }

    // Expression and line boundaries

    /// Fold the pending operand/operator run of the current frame into a node.
    fn close_expression(&mut self) -> ParseResult {
        let frame = self.frame();
        if !frame.in_expr() {
            return Ok(());
        }
        let start = frame.run_start();
        let run: SmallVec<[RunItem; 8]> = frame
            .items
            .drain(start..)
            .filter_map(|item| match item {
                Item::Run(run) => Some(run),
                _ => None,
            })
            .collect();
        let id = assemble(run, &mut self.arena)?;
        self.frame().items.push(Item::Node(id));
        Ok(())
    }

    /// Finish the current statement and append it to the frame's lines.
    fn close_line(&mut self) -> ParseResult {
        self.close_expression()?;
        let items = std::mem::take(&mut self.frame().items);
        if let Some(stmt) = self.weld(items)? {
            self.frame().lines.push(stmt);
        }
        Ok(())
    }

    /// Close a `,`/`;` separated part of a call, header or parameter list.
    fn close_part(&mut self) -> ParseResult {
        self.close_line()?;
        let lines = std::mem::take(&mut self.frame().lines);
        let part = match lines.as_slice() {
            [] => None,
            [single] => Some(*single),
            [_, second, ..] => {
                return Err(ParseError::new(
                    ParseErrorKind::MissingSeparator,
                    self.span_of(*second),
                ))
            }
        };
        self.frame().parts.push(part);
        Ok(())
    }

    /// Combine a line's items into one statement, working down from the top.
    fn weld(&mut self, items: Vec<Item>) -> ParseResult<Option<ExprId>> {
        let mut pending: SmallVec<[ExprId; 2]> = SmallVec::new();
        let mut else_branch: Option<(ExprId, Span)> = None;

        for item in items.into_iter().rev() {
            if let Some((_, else_span)) = else_branch {
                if !matches!(item, Item::Node(_) | Item::If { .. }) {
                    return Err(ParseError::new(ParseErrorKind::ElseWithoutIf, else_span));
                }
            }
            match item {
                Item::Node(id) => pending.insert(0, id),
                Item::Run(_) => {
                    // close_expression drained every run item
                    return Err(ParseError::new(
                        ParseErrorKind::ExpectedExpression("a complete expression"),
                        self.frame_ref().open_span,
                    ));
                }
                Item::Else { span } => {
                    let branch = self.take_one(&mut pending, "an `else` branch", span)?;
                    else_branch = Some((branch, span));
                }
                Item::Assign { target, decl, span } => {
                    let value = self.take_one(&mut pending, "a value", span)?;
                    let span = span.merge(self.span_of(value));
                    let id = self.alloc(
                        ExprKind::Assign {
                            target,
                            var: VarRef::UNRESOLVED,
                            decl,
                            op: None,
                            value,
                        },
                        span,
                    );
                    pending.push(id);
                }
                Item::If { cond, span } => {
                    let then_branch = self.take_one(&mut pending, "an `if` body", span)?;
                    let else_id = else_branch.take().map(|(id, _)| id);
                    let end = self.span_of(else_id.unwrap_or(then_branch));
                    let id = self.alloc(
                        ExprKind::If {
                            cond,
                            then_branch,
                            else_branch: else_id,
                            then_scope: ScopeShape::default(),
                            else_scope: ScopeShape::default(),
                        },
                        span.merge(end),
                    );
                    pending.push(id);
                }
                Item::While { cond, span } => {
                    let body = self.take_one(&mut pending, "a loop body", span)?;
                    let span = span.merge(self.span_of(body));
                    let id = self.alloc(
                        ExprKind::While {
                            cond,
                            body,
                            title: ScopeShape::default(),
                            body_scope: ScopeShape::default(),
                        },
                        span,
                    );
                    pending.push(id);
                }
                Item::For {
                    init,
                    cond,
                    step,
                    span,
                } => {
                    let body = self.take_one(&mut pending, "a loop body", span)?;
                    let span = span.merge(self.span_of(body));
                    let id = self.alloc(
                        ExprKind::For {
                            init,
                            cond,
                            step,
                            body,
                            title: ScopeShape::default(),
                            body_scope: ScopeShape::default(),
                        },
                        span,
                    );
                    pending.push(id);
                }
                Item::Def {
                    name,
                    anonymous,
                    params,
                    span,
                } => {
                    let body = self.take_one(&mut pending, "a function body", span)?;
                    let id = self.def_node(name, anonymous, params, body, span)?;
                    pending.push(id);
                }
            }
        }

        if let Some((_, span)) = else_branch {
            return Err(ParseError::new(ParseErrorKind::ElseWithoutIf, span));
        }
        match pending.as_slice() {
            [] => Ok(None),
            [stmt] => Ok(Some(*stmt)),
            [_, second, ..] => Err(ParseError::new(
                ParseErrorKind::MissingSeparator,
                self.span_of(*second),
            )),
        }
    }

    /// Take the single node a structural item adopts.
    fn take_one(
        &self,
        pending: &mut SmallVec<[ExprId; 2]>,
        what: &'static str,
        span: Span,
    ) -> ParseResult<ExprId> {
        match pending.as_slice() {
            [] => Err(ParseError::new(ParseErrorKind::ExpectedExpression(what), span)),
            [single] => {
                let id = *single;
                pending.clear();
                Ok(id)
            }
            [_, second, ..] => Err(ParseError::new(
                ParseErrorKind::MissingSeparator,
                self.span_of(*second),
            )),
        }
    }

    fn def_node(
        &mut self,
        name: Name,
        anonymous: bool,
        params: spl_ir::ParamRange,
        body: ExprId,
        span: Span,
    ) -> ParseResult<ExprId> {
        let body_expr = self.arena.get_expr(body);
        if !matches!(body_expr.kind, ExprKind::Block(_)) {
            return Err(ParseError::new(ParseErrorKind::MissingFunctionBody, body_expr.span));
        }
        let span = span.merge(body_expr.span);
        let binding = (!anonymous).then_some(VarRef::UNRESOLVED);
        Ok(self.alloc(
            ExprKind::Def {
                name,
                binding,
                params,
                body,
                frame: ScopeShape::default(),
            },
            span,
        ))
    }

    // Delimiters

    fn semicolon(&mut self, span: Span) -> ParseResult {
        match self.frame_ref().kind {
            FrameKind::Root | FrameKind::Block => {
                if let Some(&open) = self.frame_ref().groups.last() {
                    return Err(ParseError::new(ParseErrorKind::UnclosedDelimiter('('), open));
                }
                self.close_line()
            }
            FrameKind::Condition(_) if self.frame_ref().groups.is_empty() => self.close_part(),
            _ => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken(";".to_owned()),
                span,
            )),
        }
    }

    fn comma(&mut self, span: Span) -> ParseResult {
        let frame = self.frame_ref();
        match frame.kind {
            FrameKind::Call { .. } | FrameKind::Params { .. } if frame.groups.is_empty() => {
                self.close_part()
            }
            _ => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken(",".to_owned()),
                span,
            )),
        }
    }

    /// `(` after a name or after a call's `)` starts a call; anywhere else
    /// it opens a group.
    fn open_paren(&mut self, span: Span) {
        let after_name = self
            .prev
            .and_then(|t| t.kind.ident())
            .is_some_and(|name| Self::is_identifier(self.text(name)));
        let callable = after_name || self.follows(self.call_end);
        let callee = match self.frame_ref().items.last() {
            Some(Item::Run(RunItem::Operand(id))) if callable => Some(*id),
            _ => None,
        };

        if let Some(callee) = callee {
            self.frame().items.pop();
            let open = self.span_of(callee).merge(span);
            self.push_frame(FrameKind::Call { callee }, open);
        } else {
            self.frame().groups.push(span);
        }
    }

    fn close_paren(&mut self, span: Span) -> ParseResult {
        if self.frame().groups.pop().is_some() {
            return Ok(());
        }
        match self.frame_ref().kind {
            FrameKind::Call { callee } => self.finish_call(callee, span),
            FrameKind::Condition(construct) => self.finish_condition(construct, span),
            FrameKind::Params { name, anonymous } => self.finish_params(name, anonymous, span),
            FrameKind::Root => Err(ParseError::new(ParseErrorKind::UnmatchedParen, span)),
            FrameKind::Block => Err(ParseError::new(
                ParseErrorKind::MismatchedDelimiter {
                    expected: '}',
                    found: ')',
                },
                span,
            )
            .with_opening(self.frame_ref().open_span)),
        }
    }

    fn finish_call(&mut self, callee: ExprId, close: Span) -> ParseResult {
        self.close_part()?;
        let frame = self.pop_frame();
        let args = Self::list_parts(&frame.parts, "an argument", close)?;
        let args = self.arena.alloc_expr_list(args);
        let span = frame.open_span.merge(close);
        let id = self.alloc(ExprKind::Call { callee, args }, span);
        self.frame().items.push(Item::Run(RunItem::Operand(id)));
        self.call_end = Some(self.pos);
        Ok(())
    }

    /// Parts of a comma-separated list; `()` is the only place an empty part
    /// is allowed.
    fn list_parts(
        parts: &[Option<ExprId>],
        what: &'static str,
        close: Span,
    ) -> ParseResult<SmallVec<[ExprId; 8]>> {
        if let [None] = parts {
            return Ok(SmallVec::new());
        }
        parts
            .iter()
            .map(|part| part.ok_or_else(|| ParseError::new(ParseErrorKind::ExpectedExpression(what), close)))
            .collect()
    }

    fn construct(&mut self, construct: Construct, keyword: &'static str, span: Span) -> ParseResult {
        self.close_expression()?;
        self.expect_open_paren(keyword, span)?;
        self.push_frame(FrameKind::Condition(construct), span);
        Ok(())
    }

    fn expect_open_paren(&mut self, after: &'static str, span: Span) -> ParseResult {
        if self.peek_text() == Some("(") {
            self.next_token();
            Ok(())
        } else {
            let at = self.peek().map_or(span, |t| t.span);
            Err(ParseError::new(ParseErrorKind::ExpectedParen(after), at))
        }
    }

    fn finish_condition(&mut self, construct: Construct, close: Span) -> ParseResult {
        self.close_part()?;
        let frame = self.pop_frame();
        let span = frame.open_span;
        let item = match (construct, frame.parts.as_slice()) {
            (Construct::If | Construct::While, [Some(cond)]) => {
                if construct == Construct::If {
                    Item::If { cond: *cond, span }
                } else {
                    Item::While { cond: *cond, span }
                }
            }
            (Construct::If | Construct::While, [None]) => {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedExpression("a condition"),
                    close,
                ))
            }
            (Construct::If | Construct::While, _) => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedToken(";".to_owned()),
                    span.merge(close),
                ))
            }
            (Construct::For, [init, cond, step]) => Item::For {
                init: *init,
                cond: *cond,
                step: *step,
                span,
            },
            (Construct::For, [_, _]) => {
                return Err(ParseError::new(
                    ParseErrorKind::ForEachUnsupported,
                    span.merge(close),
                ))
            }
            (Construct::For, parts) => {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidForHeader(parts.len()),
                    span.merge(close),
                ))
            }
        };
        self.frame().items.push(item);
        self.condition_end = Some(self.pos);
        Ok(())
    }

    fn close_block(&mut self, span: Span) -> ParseResult {
        let frame = self.frame_ref();
        if let Some(&open) = frame.groups.last() {
            return Err(ParseError::new(
                ParseErrorKind::MismatchedDelimiter {
                    expected: ')',
                    found: '}',
                },
                span,
            )
            .with_opening(open));
        }
        match frame.kind {
            FrameKind::Block => {}
            FrameKind::Root => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedToken("}".to_owned()),
                    span,
                ))
            }
            kind => {
                return Err(ParseError::new(
                    ParseErrorKind::MismatchedDelimiter {
                        expected: kind.closer(),
                        found: '}',
                    },
                    span,
                )
                .with_opening(frame.open_span))
            }
        }

        self.close_line()?;
        let frame = self.pop_frame();
        let stmts = self.arena.alloc_expr_list(frame.lines);
        let block = self.alloc(ExprKind::Block(stmts), frame.open_span.merge(span));

        // An anonymous function is a value: it joins the enclosing expression.
        if let Some(&Item::Def {
            name,
            anonymous: true,
            params,
            span: def_span,
        }) = self.frame_ref().items.last()
        {
            self.frame().items.pop();
            let id = self.def_node(name, true, params, block, def_span)?;
            self.frame().items.push(Item::Run(RunItem::Operand(id)));
            return Ok(());
        }

        self.frame().items.push(Item::Node(block));
        if self.peek_text() != Some("else") {
            self.close_line()?;
        }
        Ok(())
    }

    // Statements

    fn assign(&mut self, span: Span) -> ParseResult {
        // Assignment is a statement; it cannot sit inside a group.
        if !self.frame_ref().groups.is_empty() {
            return Err(ParseError::new(ParseErrorKind::InvalidAssignTarget, span));
        }
        let frame = self.frame();
        let start = frame.run_start();
        let target = match &frame.items[start..] {
            [Item::Run(RunItem::Operand(id))] => Some(*id),
            _ => None,
        };
        let name = target.and_then(|id| match self.arena.get_expr(id).kind {
            ExprKind::Ident { name, .. } => Some(name),
            _ => None,
        });
        let Some(name) = name else {
            let at = target.map_or(span, |id| self.span_of(id));
            return Err(ParseError::new(ParseErrorKind::InvalidAssignTarget, at));
        };
        let target_span = target.map_or(span, |id| self.span_of(id));
        self.frame().items.pop();
        self.frame().items.push(Item::Assign {
            target: name,
            decl: DeclKind::Plain,
            span: target_span,
        });
        Ok(())
    }

    /// `var x`, `var x = v`, `const x = v`.
    fn declaration(&mut self, decl: DeclKind, span: Span) -> ParseResult {
        self.close_expression()?;
        let name = match self.peek() {
            Some(Token {
                kind: TokenKind::Ident(name),
                ..
            }) if Self::is_identifier(self.text(name)) => name,
            other => {
                let at = other.map_or(span, |t| t.span);
                return Err(ParseError::new(ParseErrorKind::InvalidAssignTarget, at));
            }
        };
        self.next_token();
        let target_span = span.merge(self.current.map_or(span, |t| t.span));

        if self.peek_text() == Some("=") {
            self.next_token();
            self.frame().items.push(Item::Assign {
                target: name,
                decl,
                span: target_span,
            });
            return Ok(());
        }

        if decl == DeclKind::Const {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedExpression("an initializer for `const`"),
                target_span,
            ));
        }
        let value = self.alloc(ExprKind::Null, target_span);
        let id = self.alloc(
            ExprKind::Assign {
                target: name,
                var: VarRef::UNRESOLVED,
                decl,
                op: None,
                value,
            },
            target_span,
        );
        self.frame().items.push(Item::Node(id));
        Ok(())
    }

    fn else_branch(&mut self, span: Span) -> ParseResult {
        // A braceless `then` body is still a pending run.
        self.close_expression()?;
        if matches!(self.frame_ref().items.last(), Some(Item::Node(_))) {
            self.frame().items.push(Item::Else { span });
            Ok(())
        } else {
            Err(ParseError::new(ParseErrorKind::ElseWithoutIf, span))
        }
    }

    /// `def name(params) { body }` or anonymous `def (params) { body }`.
    fn def(&mut self, keyword: &'static str, span: Span) -> ParseResult {
        let named = self.peek_text().filter(|text| Self::is_identifier(text));
        let (name, anonymous) = if named.is_some() {
            let token = self.next_token();
            let name = token.and_then(|t| t.kind.ident()).unwrap_or(Name::EMPTY);
            (name, false)
        } else {
            let name = self.interner.intern(&format!("anon#{}", self.anon_counter));
            self.anon_counter += 1;
            (name, true)
        };

        if !anonymous {
            self.close_expression()?;
        }
        self.expect_open_paren(keyword, span)?;
        self.push_frame(FrameKind::Params { name, anonymous }, span);
        Ok(())
    }

    fn finish_params(&mut self, name: Name, anonymous: bool, close: Span) -> ParseResult {
        self.close_part()?;
        let frame = self.pop_frame();
        let parts = Self::list_parts(&frame.parts, "a parameter", close)?;

        let mut params: SmallVec<[Param; 8]> = SmallVec::new();
        for id in parts {
            let expr = self.arena.get_expr(id);
            let param = match expr.kind {
                ExprKind::Ident { name, .. } => Param {
                    name,
                    default: None,
                    span: expr.span,
                },
                ExprKind::Assign {
                    target,
                    decl: DeclKind::Plain,
                    op: None,
                    value,
                    ..
                } => Param {
                    name: target,
                    default: Some(value),
                    span: expr.span,
                },
                _ => return Err(ParseError::new(ParseErrorKind::InvalidParameter, expr.span)),
            };
            params.push(param);
        }
        let params = self.arena.alloc_params(params);

        if self.peek_text() != Some("{") {
            let at = self.peek().map_or(close, |t| t.span);
            return Err(ParseError::new(ParseErrorKind::MissingFunctionBody, at));
        }
        self.frame().items.push(Item::Def {
            name,
            anonymous,
            params,
            span: frame.open_span,
        });
        Ok(())
    }

    fn finish(mut self) -> ParseResult<Program> {
        if self.frames.len() > 1 {
            let frame = self.frame_ref();
            return Err(ParseError::new(
                ParseErrorKind::UnclosedDelimiter(frame.kind.opener()),
                frame.open_span,
            ));
        }
        if let Some(&open) = self.frame_ref().groups.last() {
            return Err(ParseError::new(ParseErrorKind::UnclosedDelimiter('('), open));
        }
        self.close_line()?;

        let root = self.pop_frame();
        let body = self.arena.alloc_expr_list(root.lines);
        debug!(
            statements = body.len,
            nodes = self.arena.expr_count(),
            anonymous = self.anon_counter,
            "built syntax tree"
        );
        Ok(Program {
            arena: self.arena,
            body,
            scope: ScopeShape::default(),
        })
    }
}
