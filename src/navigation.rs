use crate::error::StoreError;
use crate::image_store::SharedImageStore;
use crate::landmark::Landmark;
use crate::view::{landmark_detail, landmark_list, View};

/// One entry on the display stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    List,
    Detail(i32),
}

/// Wraps the master list in a display stack and pushes a detail screen
/// when a row is activated.
pub struct Navigator {
    landmarks: Vec<Landmark>,
    store: SharedImageStore,
    stack: Vec<Screen>,
}

impl Navigator {
    pub fn new(landmarks: Vec<Landmark>, store: SharedImageStore) -> Self {
        Navigator {
            landmarks,
            store,
            stack: vec![Screen::List],
        }
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn top(&self) -> Screen {
        *self.stack.last().unwrap_or(&Screen::List)
    }

    /// Push the detail screen for the landmark with `id`. Unknown ids
    /// leave the stack alone and return false.
    pub fn activate(&mut self, id: i32) -> bool {
        if self.landmarks.iter().any(|l| l.id == id) {
            self.stack.push(Screen::Detail(id));
            true
        } else {
            false
        }
    }

    /// Pop back one screen. The list at the root never pops.
    pub fn pop(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Navigation-bar title for the current screen.
    pub fn title(&self) -> &str {
        match self.top() {
            Screen::List => "Landmarks",
            Screen::Detail(id) => self
                .landmarks
                .iter()
                .find(|l| l.id == id)
                .map(|l| l.name.as_str())
                .unwrap_or(""),
        }
    }

    /// Render the screen at the top of the stack.
    pub fn current(&self) -> Result<View, StoreError> {
        match self.top() {
            Screen::List => landmark_list(&self.landmarks, &self.store),
            Screen::Detail(id) => {
                let landmark = self
                    .landmarks
                    .iter()
                    .find(|l| l.id == id)
                    .ok_or_else(|| StoreError::ResourceNotFound(format!("landmark {id}")))?;
                landmark_detail(landmark, &self.store)
            }
        }
    }
}
