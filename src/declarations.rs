//! Declaration introspection: the real parameter list of a function.
//!
//! The function comment sniff cross-references `@param` tags against the
//! parameters a declaration actually has.  [`DeclarationIndex`] answers
//! that question from the `mago_syntax` AST, keyed by the byte offset of
//! the declaration's name so that a `function` token from the
//! [`TokenStream`] can be matched to its AST node.
//!
//! Declarations the AST walk does not reach (functions nested in function
//! bodies, methods of anonymous classes, files the parser gives up on) fall
//! back to a token-level scan of the parenthesised parameter list.
use std::collections::HashMap;

use bumpalo::Bump;
use mago_span::HasSpan;
use mago_syntax::ast::*;
use mago_syntax::parser::parse_file_content;
use tracing::trace;

use crate::tokens::{TokenKind, TokenStream};
use crate::types::RealParameter;

/// Source of truth for a declaration's real parameters.
pub trait ParameterSource {
    /// Parameters of the function whose `function` keyword is at
    /// `function_ptr`, in declaration order.
    fn parameters(&self, tokens: &TokenStream, function_ptr: usize) -> Vec<RealParameter>;
}

/// Parameters of every named function and method in a file.
#[derive(Debug, Clone, Default)]
pub struct DeclarationIndex {
    by_name_offset: HashMap<u32, Vec<RealParameter>>,
}

impl DeclarationIndex {
    /// Parse `content` and record the parameters of every function and
    /// class-like method reachable from the top level.
    pub fn build(file_name: &str, content: &str) -> Self {
        let arena = Bump::new();
        let file_id = mago_database::file::FileId::new(file_name);
        let program = parse_file_content(&arena, file_id, content);

        let mut index = Self::default();
        index.collect_from_statements(program.statements.iter());
        trace!(
            file = file_name,
            declarations = index.by_name_offset.len(),
            "indexed declarations"
        );
        index
    }

    /// Number of indexed declarations.
    pub fn len(&self) -> usize {
        self.by_name_offset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name_offset.is_empty()
    }

    /// Parameters of the declaration whose name starts at byte `offset`.
    pub fn get(&self, offset: u32) -> Option<&[RealParameter]> {
        self.by_name_offset.get(&offset).map(Vec::as_slice)
    }

    fn collect_from_statements<'a>(&mut self, statements: impl Iterator<Item = &'a Statement<'a>>) {
        for statement in statements {
            match statement {
                Statement::Function(func) => {
                    self.insert(func.name.span().start.offset, &func.parameter_list);
                }
                Statement::Namespace(namespace) => {
                    self.collect_from_statements(namespace.statements().iter());
                }
                Statement::Block(block) => {
                    self.collect_from_statements(block.statements.iter());
                }
                // `if (!function_exists('foo')) { function foo() {} }`
                Statement::If(if_stmt) => {
                    self.collect_from_if_body(&if_stmt.body);
                }
                Statement::Class(class) => self.collect_from_members(class.members.iter()),
                Statement::Interface(iface) => self.collect_from_members(iface.members.iter()),
                Statement::Trait(trait_def) => {
                    self.collect_from_members(trait_def.members.iter());
                }
                Statement::Enum(enum_def) => self.collect_from_members(enum_def.members.iter()),
                _ => {}
            }
        }
    }

    fn collect_from_members<'a>(&mut self, members: impl Iterator<Item = &'a ClassLikeMember<'a>>) {
        for member in members {
            if let ClassLikeMember::Method(method) = member {
                self.insert(method.name.span().start.offset, &method.parameter_list);
            }
        }
    }

    /// Handles both brace-delimited and colon-delimited `if` bodies,
    /// including `elseif` and `else` branches.
    fn collect_from_if_body<'a>(&mut self, body: &'a IfBody<'a>) {
        match body {
            IfBody::Statement(body) => {
                self.collect_from_statements(std::iter::once(body.statement));
                for else_if in body.else_if_clauses.iter() {
                    self.collect_from_statements(std::iter::once(else_if.statement));
                }
                if let Some(else_clause) = &body.else_clause {
                    self.collect_from_statements(std::iter::once(else_clause.statement));
                }
            }
            IfBody::ColonDelimited(body) => {
                self.collect_from_statements(body.statements.iter());
                for else_if in body.else_if_clauses.iter() {
                    self.collect_from_statements(else_if.statements.iter());
                }
                if let Some(else_clause) = &body.else_clause {
                    self.collect_from_statements(else_clause.statements.iter());
                }
            }
        }
    }

    fn insert(&mut self, name_offset: u32, parameter_list: &FunctionLikeParameterList) {
        self.by_name_offset
            .insert(name_offset, extract_parameters(parameter_list));
    }
}

impl ParameterSource for DeclarationIndex {
    fn parameters(&self, tokens: &TokenStream, function_ptr: usize) -> Vec<RealParameter> {
        let indexed = tokens
            .declaration_name_ptr(function_ptr)
            .and_then(|name| self.get(tokens[name].offset));

        match indexed {
            Some(params) => params.to_vec(),
            None => {
                trace!(function_ptr, "declaration not indexed, scanning tokens");
                parameters_from_tokens(tokens, function_ptr)
            }
        }
    }
}

/// Extract parameter information from a function-like parameter list.
fn extract_parameters(parameter_list: &FunctionLikeParameterList) -> Vec<RealParameter> {
    parameter_list
        .parameters
        .iter()
        .map(|param| RealParameter {
            name: param.variable.name.to_string(),
            pass_by_reference: param.ampersand.is_some(),
            has_default: param.default_value.is_some(),
            is_variadic: param.ellipsis.is_some(),
        })
        .collect()
}

/// Read the parameter list directly from the tokens following the
/// `function` keyword at `function_ptr`.
///
/// Each top-level comma-separated segment of the parenthesised list yields
/// one parameter named after its first variable.  Nested brackets (default
/// values such as `array(1, 2)`) are skipped.
pub fn parameters_from_tokens(tokens: &TokenStream, function_ptr: usize) -> Vec<RealParameter> {
    let mut params = Vec::new();
    let Some(open) = tokens.find_next(&[TokenKind::OpenParenthesis], function_ptr) else {
        return params;
    };

    let mut depth = 0usize;
    let mut current: Option<RealParameter> = None;
    let mut by_reference = false;
    let mut variadic = false;

    for ptr in open..tokens.len() {
        let token = &tokens[ptr];
        match token.kind {
            TokenKind::OpenParenthesis
            | TokenKind::OpenSquareBracket
            | TokenKind::AttributeStart
            | TokenKind::OpenCurlyBracket => depth += 1,
            TokenKind::CloseParenthesis
            | TokenKind::CloseSquareBracket
            | TokenKind::CloseCurlyBracket => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    params.extend(current.take());
                    break;
                }
            }
            _ if depth != 1 => {}
            TokenKind::Ampersand if current.is_none() => by_reference = true,
            TokenKind::Ellipsis if current.is_none() => variadic = true,
            TokenKind::Variable if current.is_none() => {
                current = Some(RealParameter {
                    name: token.content.clone(),
                    pass_by_reference: by_reference,
                    has_default: false,
                    is_variadic: variadic,
                });
            }
            TokenKind::Equal => {
                if let Some(param) = current.as_mut() {
                    param.has_default = true;
                }
            }
            TokenKind::Comma => {
                params.extend(current.take());
                by_reference = false;
                variadic = false;
            }
            _ => {}
        }
    }

    params
}
