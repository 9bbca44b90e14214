use crate::{
    animation::action::Action,
    foundation::core::{NodeProps, Size},
    foundation::error::LetterFxResult,
    text::label::{CharacterElement, Label},
};

/// What the director needs from a text node: indexed character elements,
/// the node's own properties and runner, and a way to clone itself.
pub trait TextDisplay: Sized {
    /// Number of characters, newlines included.
    fn char_count(&self) -> usize;

    fn char_at(&self, index: usize) -> Option<char>;

    /// Element for `index`, `None` for newlines and out-of-range indices.
    fn element(&self, index: usize) -> Option<&CharacterElement>;

    fn element_mut(&mut self, index: usize) -> Option<&mut CharacterElement>;

    fn content_size(&self) -> Size;

    fn node(&self) -> &NodeProps;

    fn node_mut(&mut self) -> &mut NodeProps;

    /// Run `action` on the display node itself.
    fn run_node_action(&mut self, action: Action);

    /// Fresh copy of the display at its rest layout, with no running actions.
    fn duplicate(&self) -> LetterFxResult<Self>;

    fn is_newline(&self, index: usize) -> bool {
        self.char_at(index) == Some('\n')
    }

    /// Number of characters that have an element.
    fn element_count(&self) -> usize {
        (0..self.char_count())
            .filter(|&i| self.element(i).is_some())
            .count()
    }
}

impl TextDisplay for Label {
    fn char_count(&self) -> usize {
        Label::char_count(self)
    }

    fn char_at(&self, index: usize) -> Option<char> {
        Label::char_at(self, index)
    }

    fn element(&self, index: usize) -> Option<&CharacterElement> {
        Label::element(self, index)
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut CharacterElement> {
        Label::element_mut(self, index)
    }

    fn content_size(&self) -> Size {
        Label::content_size(self)
    }

    fn node(&self) -> &NodeProps {
        Label::node(self)
    }

    fn node_mut(&mut self) -> &mut NodeProps {
        Label::node_mut(self)
    }

    fn run_node_action(&mut self, action: Action) {
        self.run_action(action);
    }

    fn duplicate(&self) -> LetterFxResult<Self> {
        Ok(Label::duplicate(self))
    }

    fn element_count(&self) -> usize {
        self.elements().count()
    }
}
