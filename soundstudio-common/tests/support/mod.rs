use std::cell::{Cell, RefCell};

use soundstudio_common::{Banner, BannerHost, NotifyError};

/// Initialize tracing for tests with proper test output handling
#[allow(dead_code)]
pub fn tracing_init() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true)
        .try_init();
}

/// Banner host that mirrors a page container as a list, newest first.
#[derive(Default)]
#[allow(dead_code)]
pub struct PageBanners {
    next_id: Cell<u32>,
    pub visible: RefCell<Vec<(u32, Banner)>>,
}

#[allow(dead_code)]
impl PageBanners {
    pub fn messages(&self) -> Vec<String> {
        self.visible
            .borrow()
            .iter()
            .map(|(_, b)| b.message.clone())
            .collect()
    }

    /// Simulate the user clicking the banner's close button.
    pub fn user_close(&self, id: u32) {
        self.visible.borrow_mut().retain(|(b, _)| *b != id);
    }
}

impl BannerHost for PageBanners {
    type Element = u32;

    fn insert(&self, banner: &Banner) -> Result<u32, NotifyError> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.visible.borrow_mut().insert(0, (id, banner.clone()));
        Ok(id)
    }

    fn remove(&self, element: &u32) {
        self.visible.borrow_mut().retain(|(id, _)| id != element);
    }
}
