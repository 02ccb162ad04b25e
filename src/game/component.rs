//! Component Kinds and Values
//!
//! Components are stored as one sum type, [`Component`], in a small array per
//! entity indexed by the registry bit of the component's kind. This keeps
//! access O(1) without any runtime type lookups: [`ComponentData`] maps each
//! concrete struct to its kind and its enum variant at compile time.

use super::components::{Background, Damage, Flicker, Health, Position, Sprite, Velocity};

/// Type-level tag for each component a game entity can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Position,
    Velocity,
    Sprite,
    Health,
    Damage,
    Flicker,
    Background,
}

impl ComponentKind {
    /// Every kind the game uses, in registration order.
    pub const ALL: [ComponentKind; 7] = [
        ComponentKind::Position,
        ComponentKind::Velocity,
        ComponentKind::Sprite,
        ComponentKind::Health,
        ComponentKind::Damage,
        ComponentKind::Flicker,
        ComponentKind::Background,
    ];
}

/// A component value of any kind.
#[derive(Debug, Clone)]
pub enum Component {
    Position(Position),
    Velocity(Velocity),
    Sprite(Sprite),
    Health(Health),
    Damage(Damage),
    Flicker(Flicker),
    Background(Background),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Position(_) => ComponentKind::Position,
            Component::Velocity(_) => ComponentKind::Velocity,
            Component::Sprite(_) => ComponentKind::Sprite,
            Component::Health(_) => ComponentKind::Health,
            Component::Damage(_) => ComponentKind::Damage,
            Component::Flicker(_) => ComponentKind::Flicker,
            Component::Background(_) => ComponentKind::Background,
        }
    }
}

/// Typed view of one [`Component`] variant.
pub trait ComponentData: Sized {
    const KIND: ComponentKind;

    fn into_component(self) -> Component;
    fn from_component(component: &Component) -> Option<&Self>;
    fn from_component_mut(component: &mut Component) -> Option<&mut Self>;
}

macro_rules! component_data {
    ($($ty:ident),* $(,)?) => {
        $(
            impl ComponentData for $ty {
                const KIND: ComponentKind = ComponentKind::$ty;

                fn into_component(self) -> Component {
                    Component::$ty(self)
                }

                fn from_component(component: &Component) -> Option<&Self> {
                    match component {
                        Component::$ty(value) => Some(value),
                        _ => None,
                    }
                }

                fn from_component_mut(component: &mut Component) -> Option<&mut Self> {
                    match component {
                        Component::$ty(value) => Some(value),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Component {
                fn from(value: $ty) -> Self {
                    value.into_component()
                }
            }
        )*
    };
}

component_data!(Position, Velocity, Sprite, Health, Damage, Flicker, Background);
