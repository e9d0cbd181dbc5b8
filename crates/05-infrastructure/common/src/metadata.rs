//! 元数据定义
//!
//! 提供类型的祖先结构（基类、接口）和泛型信息。Rust 没有运行时泛型反射，
//! 所以候选类型通过显式构建的 [`TypeInfo`] 暴露自己的祖先。

use crate::errors::{TypeModelError, TypeModelResult};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// 类型种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// 类（可能是抽象类）
    Class,
    /// 接口
    Interface,
    /// 泛型定义中的类型参数
    GenericParameter { position: usize },
}

/// 类型可见性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// 公开
    #[default]
    Public,
    /// 内部
    Internal,
}

/// 类型的结构化身份
///
/// 封闭泛型类型的身份是（泛型定义身份，有序类型实参身份），
/// 经由不同路径得到的同一封闭接口因此相等。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeKey {
    /// 非泛型类型
    Named(String),
    /// 泛型定义，参数个数是身份的一部分：`Func<T>` 与 `Func<T1, T2>` 不同
    Definition { path: String, arity: usize },
    /// 泛型参数，归属于声明它的泛型定义
    Parameter {
        owner: Box<TypeKey>,
        position: usize,
        name: String,
    },
    /// 构造出的泛型类型
    Constructed {
        definition: Box<TypeKey>,
        arguments: Vec<TypeKey>,
    },
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) | Self::Definition { path: name, .. } | Self::Parameter { name, .. } => {
                f.write_str(name)
            }
            Self::Constructed {
                definition,
                arguments,
            } => {
                write!(f, "{definition}<")?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                f.write_str(">")
            }
        }
    }
}

/// 泛型信息
#[derive(Clone)]
pub enum Generics {
    /// 非泛型
    NonGeneric,
    /// 开放泛型定义，例如 `Handler<T>`
    Definition { parameters: Vec<Arc<TypeInfo>> },
    /// 由定义构造出的类型，例如 `Handler<Invoice>`
    Constructed {
        definition: Arc<TypeInfo>,
        arguments: Vec<Arc<TypeInfo>>,
    },
}

/// 类型信息
///
/// 相等性与哈希只取决于 [`TypeKey`]。
#[derive(Clone)]
pub struct TypeInfo {
    key: TypeKey,
    name: String,
    kind: TypeKind,
    visibility: Visibility,
    is_abstract: bool,
    generics: Generics,
    base_type: Option<Arc<TypeInfo>>,
    interfaces: Vec<Arc<TypeInfo>>,
}

impl TypeInfo {
    fn generic_parameter(owner: &TypeKey, position: usize, name: String) -> Self {
        Self {
            key: TypeKey::Parameter {
                owner: Box::new(owner.clone()),
                position,
                name: name.clone(),
            },
            name,
            kind: TypeKind::GenericParameter { position },
            visibility: Visibility::Public,
            is_abstract: false,
            generics: Generics::NonGeneric,
            base_type: None,
            interfaces: Vec::new(),
        }
    }

    /// 结构化身份
    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    /// 类型路径（不含泛型实参）
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }

    /// 类型种类
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// 可见性
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// 是否为抽象类型（接口总是抽象的）
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// 是否为接口
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// 是否为泛型参数
    pub fn is_generic_parameter(&self) -> bool {
        matches!(self.kind, TypeKind::GenericParameter { .. })
    }

    /// 泛型信息
    pub fn generics(&self) -> &Generics {
        &self.generics
    }

    /// 是否为开放泛型定义
    pub fn is_generic_type_definition(&self) -> bool {
        matches!(self.generics, Generics::Definition { .. })
    }

    /// 是否由某个泛型定义构造而来（可能仍部分开放）
    pub fn is_constructed_generic_type(&self) -> bool {
        matches!(self.generics, Generics::Constructed { .. })
    }

    /// 是否包含未绑定的泛型参数
    pub fn contains_generic_parameters(&self) -> bool {
        match &self.generics {
            Generics::NonGeneric => self.is_generic_parameter(),
            Generics::Definition { .. } => true,
            Generics::Constructed { arguments, .. } => arguments
                .iter()
                .any(|argument| argument.contains_generic_parameters()),
        }
    }

    /// 是否可以作为实现候选：非接口、非抽象、不含未绑定泛型参数
    pub fn is_concrete(&self) -> bool {
        self.kind == TypeKind::Class && !self.is_abstract && !self.contains_generic_parameters()
    }

    /// 构造类型的泛型定义
    pub fn generic_type_definition(&self) -> Option<&Arc<TypeInfo>> {
        match &self.generics {
            Generics::Constructed { definition, .. } => Some(definition),
            _ => None,
        }
    }

    /// 检查此类型是否由指定的泛型定义构造
    pub fn is_constructed_from(&self, definition: &TypeInfo) -> bool {
        self.generic_type_definition()
            .is_some_and(|own| own.key == definition.key)
    }

    /// 构造类型的类型实参，或泛型定义的类型参数
    pub fn generic_arguments(&self) -> &[Arc<TypeInfo>] {
        match &self.generics {
            Generics::NonGeneric => &[],
            Generics::Definition { parameters } => parameters,
            Generics::Constructed { arguments, .. } => arguments,
        }
    }

    /// 直接基类
    pub fn base_type(&self) -> Option<&Arc<TypeInfo>> {
        self.base_type.as_ref()
    }

    /// 直接声明的接口
    pub fn interfaces(&self) -> &[Arc<TypeInfo>] {
        &self.interfaces
    }

    /// 完整的祖先序列（不含自身）
    ///
    /// 顺序是确定的：先按声明顺序深度优先遍历接口（每个接口后紧跟它继承的接口），
    /// 再是基类及基类的祖先。同一 [`TypeKey`] 只在首次出现的位置输出一次。
    pub fn ancestry(&self) -> Vec<Arc<TypeInfo>> {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        self.collect_ancestry(&mut seen, &mut ordered);
        ordered
    }

    fn collect_ancestry(&self, seen: &mut HashSet<TypeKey>, ordered: &mut Vec<Arc<TypeInfo>>) {
        let parents = self.interfaces.iter().chain(self.base_type.iter());
        for parent in parents {
            if seen.insert(parent.key.clone()) {
                ordered.push(Arc::clone(parent));
                parent.collect_ancestry(seen, ordered);
            }
        }
    }

    /// 用类型实参封闭泛型定义
    ///
    /// 定义的基类和接口中出现的类型参数会被一并替换，
    /// 所以 `BaseHandler<Invoice>` 的祖先里会出现 `Handler<Invoice>`。
    pub fn close(self: &Arc<Self>, arguments: &[Arc<TypeInfo>]) -> TypeModelResult<Arc<TypeInfo>> {
        let Generics::Definition { parameters } = &self.generics else {
            return Err(TypeModelError::NotGenericTypeDefinition {
                type_name: self.to_string(),
            });
        };

        if parameters.len() != arguments.len() {
            return Err(TypeModelError::ArityMismatch {
                type_name: self.to_string(),
                expected: parameters.len(),
                actual: arguments.len(),
            });
        }

        Ok(self.construct(arguments.to_vec()))
    }

    fn construct(self: &Arc<Self>, arguments: Vec<Arc<TypeInfo>>) -> Arc<TypeInfo> {
        let key = TypeKey::Constructed {
            definition: Box::new(self.key.clone()),
            arguments: arguments.iter().map(|argument| argument.key.clone()).collect(),
        };
        let base_type = self
            .base_type
            .as_ref()
            .map(|base| base.substitute(&self.key, &arguments));
        let interfaces = self
            .interfaces
            .iter()
            .map(|interface| interface.substitute(&self.key, &arguments))
            .collect();

        Arc::new(Self {
            key,
            name: self.name.clone(),
            kind: self.kind,
            visibility: self.visibility,
            is_abstract: self.is_abstract,
            generics: Generics::Constructed {
                definition: Arc::clone(self),
                arguments,
            },
            base_type,
            interfaces,
        })
    }

    fn substitute(self: &Arc<Self>, owner: &TypeKey, arguments: &[Arc<TypeInfo>]) -> Arc<TypeInfo> {
        if let TypeKey::Parameter {
            owner: declared,
            position,
            ..
        } = &self.key
        {
            if declared.as_ref() == owner {
                if let Some(argument) = arguments.get(*position) {
                    return Arc::clone(argument);
                }
            }
            return Arc::clone(self);
        }

        match &self.generics {
            Generics::Constructed {
                definition,
                arguments: current,
            } if self.contains_generic_parameters() => {
                let substituted = current
                    .iter()
                    .map(|argument| argument.substitute(owner, arguments))
                    .collect();
                definition.construct(substituted)
            }
            _ => Arc::clone(self),
        }
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("visibility", &self.visibility)
            .field("is_abstract", &self.is_abstract)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.generics {
            Generics::Definition { parameters } => {
                let names: Vec<&str> = parameters.iter().map(|p| p.name()).collect();
                write!(f, "{}<{}>", self.name, names.join(", "))
            }
            _ => write!(f, "{}", self.key),
        }
    }
}

/// 类型信息构建器
#[derive(Debug, Clone)]
pub struct TypeBuilder {
    name: String,
    kind: TypeKind,
    visibility: Visibility,
    is_abstract: bool,
    parameters: Vec<Arc<TypeInfo>>,
    base_type: Option<Arc<TypeInfo>>,
    interfaces: Vec<Arc<TypeInfo>>,
}

impl TypeBuilder {
    fn new(name: String, kind: TypeKind, is_abstract: bool) -> Self {
        Self {
            name,
            kind,
            visibility: Visibility::Public,
            is_abstract,
            parameters: Vec::new(),
            base_type: None,
            interfaces: Vec::new(),
        }
    }

    /// 创建类构建器
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name.into(), TypeKind::Class, false)
    }

    /// 创建接口构建器
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name.into(), TypeKind::Interface, true)
    }

    /// 以 Rust 类型的完整路径创建类构建器
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::class(std::any::type_name::<T>())
    }

    /// 声明泛型参数，使构建结果成为开放泛型定义
    pub fn generic_parameters<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let owner = TypeKey::Definition {
            path: self.name.clone(),
            arity: names.len(),
        };
        self.parameters = names
            .into_iter()
            .enumerate()
            .map(|(position, name)| Arc::new(TypeInfo::generic_parameter(&owner, position, name)))
            .collect();
        self
    }

    /// 获取已声明的泛型参数，用于描述定义自身的祖先
    pub fn parameter(&self, position: usize) -> Option<Arc<TypeInfo>> {
        self.parameters.get(position).cloned()
    }

    /// 标记为抽象类型
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// 设置可见性
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// 标记为内部类型
    pub fn internal(self) -> Self {
        self.visibility(Visibility::Internal)
    }

    /// 设置基类
    pub fn extends(mut self, base_type: Arc<TypeInfo>) -> Self {
        self.base_type = Some(base_type);
        self
    }

    /// 添加实现的接口
    pub fn implements(mut self, interface: Arc<TypeInfo>) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// 构建类型信息
    pub fn build(self) -> Arc<TypeInfo> {
        let (key, generics) = if self.parameters.is_empty() {
            (TypeKey::Named(self.name.clone()), Generics::NonGeneric)
        } else {
            (
                TypeKey::Definition {
                    path: self.name.clone(),
                    arity: self.parameters.len(),
                },
                Generics::Definition {
                    parameters: self.parameters,
                },
            )
        };

        Arc::new(TypeInfo {
            key,
            name: self.name,
            kind: self.kind,
            visibility: self.visibility,
            is_abstract: self.is_abstract,
            generics,
            base_type: self.base_type,
            interfaces: self.interfaces,
        })
    }
}

/// 可描述类型 trait
///
/// Rust 类型通过实现此 trait 暴露自己的类型元数据，充当编译期类型目录。
pub trait Describe: 'static {
    /// 获取类型信息
    fn type_info() -> Arc<TypeInfo>;
}
