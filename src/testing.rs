//! 测试替身：记录提示与导航，组装一套内存环境

use campus_energy_shared::{LoginResponse, Role};
use std::cell::RefCell;
use std::rc::Rc;

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::notify::{Notice, Notifier};
use crate::request::MockHttpClient;
use crate::route::{AppRoute, Navigator};
use crate::session::SessionHandle;
use crate::storage::MemoryStorage;

#[derive(Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notices.borrow().iter().map(|n| n.message.clone()).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    visits: RefCell<Vec<AppRoute>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<AppRoute> {
        self.visits.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: AppRoute) {
        self.visits.borrow_mut().push(route);
    }
}

pub fn login_response(role: Role) -> LoginResponse {
    LoginResponse {
        token: "tok-abc".into(),
        user_id: 7,
        username: "li".into(),
        real_name: Some("李四".into()),
        role,
        role_label: Some(role.label().into()),
    }
}

/// 一个客户端加上它的全部协作者
pub struct Harness {
    pub http: Rc<MockHttpClient>,
    pub storage: Rc<MemoryStorage>,
    pub session: SessionHandle,
    pub notifier: Rc<RecordingNotifier>,
    pub navigator: Rc<RecordingNavigator>,
    pub client: ApiClient<Rc<MockHttpClient>>,
}

/// `RUST_LOG=campus_energy=debug cargo test -- --nocapture` 查看适配器日志
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(Rc::new(MockHttpClient::new()), ClientConfig::default())
    }

    pub fn with_config(http: Rc<MockHttpClient>, config: ClientConfig) -> Self {
        init_tracing();
        let storage = Rc::new(MemoryStorage::new());
        let session = SessionHandle::hydrate(storage.clone());
        let notifier = Rc::new(RecordingNotifier::default());
        let navigator = Rc::new(RecordingNavigator::default());
        let client = ApiClient::new(
            http.clone(),
            config,
            session.clone(),
            notifier.clone(),
            navigator.clone(),
        );
        Self {
            http,
            storage,
            session,
            notifier,
            navigator,
            client,
        }
    }
}
