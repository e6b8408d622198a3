//! # Declaration Parsing
//!
//! Parses classes and their members.
//!
//! ## Grammar
//!
//! ```text
//! class_decl       = "class" ID ("extends" ID)? "{" member* "}"
//! member           = attribute_decl | method_decl | constructor_decl | destructor_decl
//! attribute_decl   = ("static" | "final")* op_type "&"? attribute_item ("," attribute_item)* ";"
//! attribute_item   = "&"? ID ((":=" | "=") expression)?
//! method_decl      = "static"? return_type "&"? ID "(" param_list? ")" block
//! constructor_decl = ID "(" param_list? ")" block
//! destructor_decl  = "~" ID "(" ")" block
//! param_list       = param_group (";" param_group)*
//! param_group      = op_type "&"? ID ("," ID)*
//! ```

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl Parser {
    /// Parse a class declaration.
    pub(super) fn parse_class_decl(&mut self) -> Result<CstNode, ParseError> {
        let mut children = vec![
            self.expect(TokenKind::Class)?,
            self.expect(TokenKind::Identifier)?,
        ];

        if let Some(extends) = self.match_leaf(TokenKind::Extends) {
            children.push(extends);
            children.push(self.expect(TokenKind::Identifier)?);
        }

        children.push(self.expect(TokenKind::LBrace)?);
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            children.push(self.parse_member()?);
        }
        children.push(self.expect(TokenKind::RBrace)?);

        Ok(CstNode::with_children(NodeKind::ClassDecl, children))
    }

    /// Parse one class member.
    ///
    /// `~` starts a destructor and `ID (` a constructor. Anything else is read
    /// as modifiers and a type; whether a method or an attribute follows is
    /// decided by the `ID (` after the type.
    fn parse_member(&mut self) -> Result<CstNode, ParseError> {
        if self.check(TokenKind::Tilde) {
            return self.parse_destructor();
        }
        if self.check(TokenKind::Identifier) && self.check_at(1, TokenKind::LParen) {
            return self.parse_constructor();
        }

        let mut modifiers = Vec::new();
        while matches!(self.peek_kind(), TokenKind::Static | TokenKind::Final) {
            modifiers.push(self.advance_leaf());
        }

        let is_method = {
            let type_len = self.type_lookahead().unwrap_or(1);
            let mut at = type_len;
            if self.check_at(at, TokenKind::Amp) {
                at += 1;
            }
            self.check_at(at, TokenKind::Identifier) && self.check_at(at + 1, TokenKind::LParen)
        };

        if is_method {
            self.parse_method(modifiers)
        } else {
            self.parse_attribute(modifiers)
        }
    }

    /// `static int & f(int a; float b, c) { ... }`
    fn parse_method(&mut self, modifiers: Vec<CstNode>) -> Result<CstNode, ParseError> {
        let mut children = Vec::new();
        for modifier in modifiers {
            if modifier.is_token(TokenKind::Final) {
                return Err(ParseError::misplaced("final", "method declaration", modifier.span));
            }
            children.push(modifier);
        }

        children.push(self.parse_return_type()?);
        if let Some(amp) = self.match_leaf(TokenKind::Amp) {
            children.push(amp);
        }
        children.push(self.expect(TokenKind::Identifier)?);
        self.parse_params_into(&mut children)?;
        children.push(self.parse_block()?);

        Ok(CstNode::with_children(NodeKind::MethodDecl, children))
    }

    /// `static final int a, &b := 1;`
    fn parse_attribute(&mut self, mut children: Vec<CstNode>) -> Result<CstNode, ParseError> {
        if self.check(TokenKind::VoidType) {
            return Err(self.error_here("attribute type"));
        }
        children.push(self.parse_op_type()?);
        self.parse_declarators_into(&mut children, NodeKind::AttributeItem)?;
        Ok(CstNode::with_children(NodeKind::AttributeDecl, children))
    }

    /// `Shape(float length, width) { ... }`
    fn parse_constructor(&mut self) -> Result<CstNode, ParseError> {
        let mut children = vec![self.expect(TokenKind::Identifier)?];
        self.parse_params_into(&mut children)?;
        children.push(self.parse_block()?);
        Ok(CstNode::with_children(NodeKind::ConstructorDecl, children))
    }

    /// `~Shape() { ... }`
    fn parse_destructor(&mut self) -> Result<CstNode, ParseError> {
        let children = vec![
            self.expect(TokenKind::Tilde)?,
            self.expect(TokenKind::Identifier)?,
            self.expect(TokenKind::LParen)?,
            self.expect(TokenKind::RParen)?,
            self.parse_block()?,
        ];
        Ok(CstNode::with_children(NodeKind::DestructorDecl, children))
    }

    /// Parse `( param_list? )` and append the tokens and list to `children`.
    fn parse_params_into(&mut self, children: &mut Vec<CstNode>) -> Result<(), ParseError> {
        children.push(self.expect(TokenKind::LParen)?);
        if !self.check(TokenKind::RParen) {
            children.push(self.parse_param_list()?);
        }
        children.push(self.expect(TokenKind::RParen)?);
        Ok(())
    }

    /// `int & a; float b, c`
    fn parse_param_list(&mut self) -> Result<CstNode, ParseError> {
        let mut list = CstNode::with_children(NodeKind::ParamList, vec![self.parse_param_group()?]);
        while let Some(semicolon) = self.match_leaf(TokenKind::Semicolon) {
            list.add_child(semicolon);
            list.add_child(self.parse_param_group()?);
        }
        Ok(list)
    }

    /// `float & a, b`
    fn parse_param_group(&mut self) -> Result<CstNode, ParseError> {
        let mut group = CstNode::with_children(NodeKind::ParamGroup, vec![self.parse_op_type()?]);
        if let Some(amp) = self.match_leaf(TokenKind::Amp) {
            group.add_child(amp);
        }
        group.add_child(self.expect(TokenKind::Identifier)?);
        while let Some(comma) = self.match_leaf(TokenKind::Comma) {
            group.add_child(comma);
            group.add_child(self.expect(TokenKind::Identifier)?);
        }
        Ok(group)
    }

    /// Parse `"&"? item ("," item)* ";"` after a declaration's type.
    ///
    /// Shared by attribute and local variable declarations; `item_kind` is
    /// [`NodeKind::AttributeItem`] or [`NodeKind::VarItem`].
    pub(super) fn parse_declarators_into(
        &mut self,
        children: &mut Vec<CstNode>,
        item_kind: NodeKind,
    ) -> Result<(), ParseError> {
        if let Some(amp) = self.match_leaf(TokenKind::Amp) {
            children.push(amp);
        }
        children.push(self.parse_declarator(item_kind)?);
        while let Some(comma) = self.match_leaf(TokenKind::Comma) {
            children.push(comma);
            children.push(self.parse_declarator(item_kind)?);
        }
        children.push(self.expect(TokenKind::Semicolon)?);
        Ok(())
    }

    /// `&x := 1`
    fn parse_declarator(&mut self, item_kind: NodeKind) -> Result<CstNode, ParseError> {
        let mut children = Vec::new();
        if let Some(amp) = self.match_leaf(TokenKind::Amp) {
            children.push(amp);
        }
        children.push(self.expect(TokenKind::Identifier)?);
        if matches!(self.peek_kind(), TokenKind::ColonEq | TokenKind::Eq) {
            children.push(self.advance_leaf());
            children.push(self.parse_expression()?);
        }
        Ok(CstNode::with_children(item_kind, children))
    }
}

// =============================================================================
// TESTS
// =============================================================================
