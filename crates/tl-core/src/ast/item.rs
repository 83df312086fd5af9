use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ast::{Comment, Ident, StatementChunk};

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Parameter {
    /// `None` for type-only parameters. A blank `_` keeps its name so it
    /// prints back, but is never reassigned.
    pub name: Option<Ident>,
    /// Type as written in the source; never interpreted.
    pub ty: String,
}

impl Parameter {
    pub fn new(name: impl Into<Ident>, ty: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ty: ty.into(),
        }
    }

    pub fn unnamed(ty: impl Into<String>) -> Self {
        Self {
            name: None,
            ty: ty.into(),
        }
    }

    /// The name when the parameter can be assigned to.
    pub fn assignable_name(&self) -> Option<&Ident> {
        self.name.as_ref().filter(|name| !name.is_blank())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct FunctionDeclaration {
    pub name: Ident,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_parameters: Option<String>,
    pub params: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Header as written, from `func` up to the body. Printed instead of the
    /// parts above when present, so parameter grouping and comments survive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// `None` for a declaration without a body.
    pub body: Option<StatementChunk>,
}

impl FunctionDeclaration {
    pub fn new(name: impl Into<Ident>, params: Vec<Parameter>, body: StatementChunk) -> Self {
        Self {
            name: name.into(),
            receiver: None,
            type_parameters: None,
            params,
            result: None,
            signature: None,
            body: Some(body),
        }
    }

    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub enum Declaration {
    Function(FunctionDeclaration),
    /// Package clause, imports, type/const/var blocks, comments.
    Opaque(String),
}

impl Declaration {
    pub fn as_function(&self) -> Option<&FunctionDeclaration> {
        match self {
            Declaration::Function(func) => Some(func),
            Declaration::Opaque(_) => None,
        }
    }

    pub fn as_function_mut(&mut self) -> Option<&mut FunctionDeclaration> {
        match self {
            Declaration::Function(func) => Some(func),
            Declaration::Opaque(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Item {
    /// Whether an empty line separated this item from the previous one.
    pub blank_line_before: bool,
    pub decl: Declaration,
    /// Comment written on the declaration's last line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailing_comment: Option<Comment>,
}

impl Item {
    pub fn new(decl: Declaration) -> Self {
        Self {
            blank_line_before: true,
            decl,
            trailing_comment: None,
        }
    }

    pub fn function(func: FunctionDeclaration) -> Self {
        Self::new(Declaration::Function(func))
    }

    pub fn opaque(text: impl Into<String>) -> Self {
        Self::new(Declaration::Opaque(text.into()))
    }
}

pub type ItemChunk = Vec<Item>;

/// One parsed source file.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub items: ItemChunk,
}

impl SourceUnit {
    pub fn new(items: ItemChunk) -> Self {
        Self {
            path: PathBuf::new(),
            items,
        }
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionDeclaration> {
        self.items.iter().filter_map(|item| item.decl.as_function())
    }

    pub fn functions_mut(&mut self) -> impl Iterator<Item = &mut FunctionDeclaration> {
        self.items
            .iter_mut()
            .filter_map(|item| item.decl.as_function_mut())
    }

    pub fn function(&self, name: &str) -> Option<&FunctionDeclaration> {
        self.functions().find(|func| func.name.as_str() == name)
    }
}

impl std::fmt::Display for SourceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SourceUnit: {}", self.path.display())?;
        for item in &self.items {
            match &item.decl {
                Declaration::Function(func) => writeln!(f, "func {}", func.name)?,
                Declaration::Opaque(text) => {
                    writeln!(f, "opaque {}", text.lines().next().unwrap_or_default())?
                }
            }
        }
        Ok(())
    }
}
