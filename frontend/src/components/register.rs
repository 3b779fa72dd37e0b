use campus_energy::route::AppRoute;
use campus_energy::shared::validate::{validate_email, validate_password, validate_phone};
use campus_energy::shared::{RegisterRequest, Role};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{register, use_auth};

/// 表单校验，返回第一条错误
fn check(username: &str, password: &str, confirm: &str, email: &str, phone: &str) -> Option<&'static str> {
    if username.trim().len() < 3 {
        return Some("用户名至少 3 个字符");
    }
    if !validate_password(password).is_valid {
        return Some("密码强度不足");
    }
    if password != confirm {
        return Some("两次输入的密码不一致");
    }
    if !validate_email(email) {
        return Some("邮箱格式不正确");
    }
    if !phone.is_empty() && !validate_phone(phone) {
        return Some("手机号格式不正确");
    }
    None
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let real_name = RwSignal::new(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<&'static str>::None);

    let strength = Memo::new(move |_| password.with(|p| validate_password(p)));

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let problem = check(
            &username.get(),
            &password.get(),
            &confirm.get(),
            &email.get(),
            &phone.get(),
        );
        set_error_msg.set(problem);
        if problem.is_some() {
            return;
        }

        let optional = |s: String| Some(s.trim().to_string()).filter(|s| !s.is_empty());
        let request = RegisterRequest {
            username: username.get().trim().to_string(),
            password: password.get(),
            email: email.get().trim().to_string(),
            real_name: optional(real_name.get()),
            phone: optional(phone.get()),
            role: Role::User,
        };

        set_is_submitting.set(true);
        spawn_local(async move {
            register(auth, request).await;
            set_is_submitting.set(false);
        });
    };

    let field = move |label: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <div class="form-control">
                <label class="label"><span class="label-text">{label}</span></label>
                <input
                    type=kind
                    on:input=move |ev| value.set(event_target_value(&ev))
                    prop:value=value
                    class="input input-bordered"
                />
            </div>
        }
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">"注册账号"</h1>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        {field("用户名", "text", username)}
                        {field("密码", "password", password)}
                        <div class="text-xs space-y-1">
                            <progress
                                class="progress progress-primary w-full"
                                value=move || strength.get().strength.to_string()
                                max="5"
                            ></progress>
                            <For
                                each=move || strength.get().tips
                                key=|tip| *tip
                                children=|tip| view! { <p class="text-base-content/60">{tip}</p> }
                            />
                        </div>
                        {field("确认密码", "password", confirm)}
                        {field("邮箱", "email", email)}
                        {field("真实姓名（可选）", "text", real_name)}
                        {field("手机号（可选）", "tel", phone)}

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() { "提交中..." } else { "注册" }}
                            </button>
                        </div>
                        <div class="text-center text-sm">
                            <a class="link" on:click=move |_| auth.navigate(AppRoute::Login)>"返回登录"</a>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::check;

    #[test]
    fn first_problem_is_reported() {
        assert_eq!(check("ab", "", "", "", ""), Some("用户名至少 3 个字符"));
        assert_eq!(check("zhang", "weak", "weak", "a@b.cn", ""), Some("密码强度不足"));
        assert_eq!(
            check("zhang", "Str0ng!pass", "other", "a@b.cn", ""),
            Some("两次输入的密码不一致")
        );
        assert_eq!(
            check("zhang", "Str0ng!pass", "Str0ng!pass", "nope", ""),
            Some("邮箱格式不正确")
        );
        assert_eq!(
            check("zhang", "Str0ng!pass", "Str0ng!pass", "a@b.cn", "123"),
            Some("手机号格式不正确")
        );
        assert_eq!(check("zhang", "Str0ng!pass", "Str0ng!pass", "a@b.cn", "13800138000"), None);
    }
}
