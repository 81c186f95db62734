use std::collections::HashMap;

use iced::widget::{
    button, column, container, horizontal_space, image as iced_image, pick_list, row, scrollable,
    slider, text, text_input, Column, Row,
};
use iced::{Alignment, ContentFit, Element, Length, Task, Theme};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult};

mod ingest;
mod state;

use ingest::pipeline;
use state::data::{Category, Project, ProjectDraft};
use state::session::Session;
use state::store::ProjectStore;

/// Which screen is on display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Home,
    Login,
    Admin,
}

/// The two image slots of the project form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Before,
    After,
}

/// State of the add/edit project form
#[derive(Default)]
struct ProjectForm {
    open: bool,
    /// `Some((id, created_at))` while editing an existing project
    editing: Option<(String, i64)>,
    title: String,
    category: Category,
    before_image: Option<String>,
    after_image: Option<String>,
    before_preview: Option<iced_image::Handle>,
    after_preview: Option<iced_image::Handle>,
    before_pending: bool,
    after_pending: bool,
}

impl ProjectForm {
    fn reset(&mut self) {
        *self = ProjectForm::default();
    }

    /// True while any slot has an ingestion in flight
    fn pending(&self) -> bool {
        self.before_pending || self.after_pending
    }

    fn is_pending(&self, slot: Slot) -> bool {
        match slot {
            Slot::Before => self.before_pending,
            Slot::After => self.after_pending,
        }
    }

    fn set_pending(&mut self, slot: Slot, pending: bool) {
        match slot {
            Slot::Before => self.before_pending = pending,
            Slot::After => self.after_pending = pending,
        }
    }

    /// Fill a slot with a freshly ingested (or pre-existing) data URL.
    /// A new value simply overwrites whatever the slot held before.
    fn set_image(&mut self, slot: Slot, data_url: String) {
        let preview = pipeline::data_url_bytes(&data_url).map(iced_image::Handle::from_bytes);
        match slot {
            Slot::Before => {
                self.before_image = Some(data_url);
                self.before_preview = preview;
            }
            Slot::After => {
                self.after_image = Some(data_url);
                self.after_preview = preview;
            }
        }
    }
}

/// Login form fields
#[derive(Default)]
struct LoginForm {
    user: String,
    pass: String,
}

/// Decoded, renderable handles for one project's pair of images
struct CardImages {
    before: iced_image::Handle,
    after: iced_image::Handle,
}

/// Main application state
struct Portfolio {
    /// The project catalog, source of truth for every listing
    store: ProjectStore,
    /// The admin session gate
    session: Session,
    screen: Screen,
    active_category: Category,
    /// Comparison slider position per project id (0-100, before | after)
    reveal: HashMap<String, f32>,
    /// Decoded image handles per project id, rebuilt after catalog changes
    /// so `view` never touches base64
    images: HashMap<String, CardImages>,
    login: LoginForm,
    form: ProjectForm,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    CategorySelected(Category),
    RevealChanged(String, f32),
    OpenLogin,
    LoginUserChanged(String),
    LoginPassChanged(String),
    SubmitLogin,
    CancelLogin,
    BackToHome,
    Logout,
    OpenForm,
    EditProject(String),
    CancelForm,
    TitleChanged(String),
    FormCategoryPicked(Category),
    PickImage(Slot),
    /// Result of one slot's ingestion; errors arrive already stringified
    ImageIngested(Slot, Result<String, String>),
    SubmitForm,
    DeleteProject(String),
}

impl Portfolio {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let store = ProjectStore::load();
        let session = Session::load();

        println!("🏗️  Pedreiro Oficial ready with {} projects", store.all().len());

        let mut app = Portfolio {
            store,
            session,
            screen: Screen::Home,
            active_category: Category::All,
            reveal: HashMap::new(),
            images: HashMap::new(),
            login: LoginForm::default(),
            form: ProjectForm::default(),
            status: String::new(),
        };
        app.rebuild_images();

        (app, Task::none())
    }

    /// Decode every stored data URL into a renderable handle
    fn rebuild_images(&mut self) {
        self.images = self
            .store
            .all()
            .iter()
            .filter_map(|project| {
                let before = pipeline::data_url_bytes(&project.before_image)?;
                let after = pipeline::data_url_bytes(&project.after_image)?;
                Some((
                    project.id.clone(),
                    CardImages {
                        before: iced_image::Handle::from_bytes(before),
                        after: iced_image::Handle::from_bytes(after),
                    },
                ))
            })
            .collect();
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CategorySelected(category) => {
                self.active_category = category;
                Task::none()
            }
            Message::RevealChanged(id, value) => {
                self.reveal.insert(id, value);
                Task::none()
            }
            Message::OpenLogin => {
                self.status.clear();
                if self.session.is_logged_in() {
                    self.screen = Screen::Admin;
                } else {
                    self.login = LoginForm::default();
                    self.screen = Screen::Login;
                }
                Task::none()
            }
            Message::LoginUserChanged(user) => {
                self.login.user = user;
                Task::none()
            }
            Message::LoginPassChanged(pass) => {
                self.login.pass = pass;
                Task::none()
            }
            Message::SubmitLogin => {
                if self.session.login(&self.login.user, &self.login.pass) {
                    self.login = LoginForm::default();
                    self.status.clear();
                    self.screen = Screen::Admin;
                } else {
                    self.status = "Invalid username or password.".to_string();
                }
                Task::none()
            }
            Message::CancelLogin | Message::BackToHome => {
                self.status.clear();
                self.screen = Screen::Home;
                Task::none()
            }
            Message::Logout => {
                self.session.logout();
                self.form.reset();
                self.status.clear();
                self.screen = Screen::Home;
                Task::none()
            }
            Message::OpenForm => {
                self.form.reset();
                self.form.open = true;
                self.status.clear();
                Task::none()
            }
            Message::EditProject(id) => {
                if let Some(project) = self.store.all().iter().find(|p| p.id == id).cloned() {
                    self.form.reset();
                    self.form.editing = Some((project.id.clone(), project.created_at));
                    self.form.title = project.title;
                    self.form.category = project.category;
                    self.form.set_image(Slot::Before, project.before_image);
                    self.form.set_image(Slot::After, project.after_image);
                    self.form.open = true;
                    self.status.clear();
                }
                Task::none()
            }
            Message::CancelForm => {
                self.form.reset();
                self.status.clear();
                Task::none()
            }
            Message::TitleChanged(title) => {
                self.form.title = title;
                Task::none()
            }
            Message::FormCategoryPicked(category) => {
                self.form.category = category;
                Task::none()
            }
            Message::PickImage(slot) => {
                // One ingestion per slot; the button is disabled anyway
                if self.form.is_pending(slot) {
                    return Task::none();
                }

                let file = FileDialog::new()
                    .set_title(match slot {
                        Slot::Before => "Select the before photo",
                        Slot::After => "Select the after photo",
                    })
                    .add_filter("Images", &["jpg", "jpeg", "png", "webp", "bmp"])
                    .pick_file();

                if let Some(path) = file {
                    self.form.set_pending(slot, true);
                    self.status = "Processing image…".to_string();
                    return Task::perform(pipeline::ingest_image(path), move |result| {
                        Message::ImageIngested(slot, result.map_err(|e| e.to_string()))
                    });
                }

                Task::none()
            }
            Message::ImageIngested(slot, result) => {
                self.form.set_pending(slot, false);
                match result {
                    Ok(data_url) => {
                        self.form.set_image(slot, data_url);
                        self.status = "Image ready.".to_string();
                    }
                    Err(e) => {
                        // The slot keeps whatever it held before
                        self.status =
                            format!("Could not process the image ({}). Try another file.", e);
                    }
                }
                Task::none()
            }
            Message::SubmitForm => {
                if self.form.pending() {
                    return Task::none();
                }

                let title = self.form.title.trim().to_string();
                if title.is_empty() {
                    self.status = "Give the project a title.".to_string();
                    return Task::none();
                }

                let (Some(before_image), Some(after_image)) =
                    (self.form.before_image.clone(), self.form.after_image.clone())
                else {
                    self.status = "Upload both the before and the after photo.".to_string();
                    return Task::none();
                };

                let result = match self.form.editing.clone() {
                    Some((id, created_at)) => self
                        .store
                        .edit(Project {
                            id,
                            title,
                            category: self.form.category,
                            before_image,
                            after_image,
                            created_at,
                        })
                        .map(|_| ()),
                    None => self
                        .store
                        .add(ProjectDraft {
                            title,
                            category: self.form.category,
                            before_image,
                            after_image,
                        })
                        .map(|_| ()),
                };

                match result {
                    Ok(()) => self.status = "Project saved.".to_string(),
                    Err(e) => {
                        self.status =
                            format!("⚠️ Saved in memory only — writing to disk failed: {}", e);
                    }
                }

                self.rebuild_images();
                self.form.reset();
                Task::none()
            }
            Message::DeleteProject(id) => {
                // Blocking yes/no decision point; nothing happens without a yes
                let confirmed = MessageDialog::new()
                    .set_title("Delete project")
                    .set_description("Are you sure you want to delete this project?")
                    .set_buttons(MessageButtons::YesNo)
                    .show();

                if confirmed == MessageDialogResult::Yes {
                    match self.store.remove(&id) {
                        Ok(true) => self.status = "Project deleted.".to_string(),
                        Ok(false) => {}
                        Err(e) => {
                            self.status =
                                format!("⚠️ Deleted in memory only — writing to disk failed: {}", e);
                        }
                    }
                    self.reveal.remove(&id);
                    self.rebuild_images();
                }

                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        match self.screen {
            Screen::Home => self.view_home(),
            Screen::Login => self.view_login(),
            Screen::Admin => self.view_admin(),
        }
    }

    fn view_home(&self) -> Element<Message> {
        let panel_label = if self.session.is_logged_in() {
            "Panel"
        } else {
            "Admin"
        };

        let header = row![
            text("PEDREIRO OFICIAL").size(28),
            horizontal_space(),
            button(text(panel_label).size(14))
                .on_press(Message::OpenLogin)
                .style(button::secondary),
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        let tagline = text("High-end remodeling, from foundation to fine finishing.").size(16);

        let filters = Category::FILTERS
            .iter()
            .fold(Row::new().spacing(8), |bar, &category| {
                let style = if category == self.active_category {
                    button::primary
                } else {
                    button::secondary
                };
                bar.push(
                    button(text(category.to_string()).size(14))
                        .on_press(Message::CategorySelected(category))
                        .style(style),
                )
            });

        let filtered = self.store.filter(self.active_category);
        let mut cards = Column::new().spacing(24);
        if filtered.is_empty() {
            cards = cards.push(
                container(text("No projects in this category yet.").size(16))
                    .padding(40)
                    .center_x(Length::Fill),
            );
        } else {
            for project in filtered {
                cards = cards.push(self.project_card(project));
            }
        }

        let content = column![header, tagline, filters, scrollable(cards).height(Length::Fill)]
            .spacing(20)
            .padding(24);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// One portfolio card: draggable before/after comparison plus caption
    fn project_card<'a>(&'a self, project: &'a Project) -> Element<'a, Message> {
        let reveal = self.reveal.get(&project.id).copied().unwrap_or(50.0);
        let id = project.id.clone();

        let comparison: Element<Message> = match self.images.get(&project.id) {
            Some(images) => {
                // The two panes share the row; dragging the slider shifts the
                // split, cropping each shot against the other
                let before_share = (reveal.round() as u16).clamp(1, 99);
                row![
                    iced_image(images.before.clone())
                        .width(Length::FillPortion(before_share))
                        .height(Length::Fixed(260.0))
                        .content_fit(ContentFit::Cover),
                    iced_image(images.after.clone())
                        .width(Length::FillPortion(100 - before_share))
                        .height(Length::Fixed(260.0))
                        .content_fit(ContentFit::Cover),
                ]
                .spacing(2)
                .into()
            }
            None => container(text("Image unavailable").size(14))
                .padding(40)
                .center_x(Length::Fill)
                .into(),
        };

        let caption = row![
            text(&project.title).size(18),
            horizontal_space(),
            text(project.category.to_string()).size(13),
        ]
        .align_y(Alignment::Center);

        container(
            column![
                comparison,
                slider(0.0..=100.0, reveal, move |value| Message::RevealChanged(
                    id.clone(),
                    value
                )),
                caption,
            ]
            .spacing(8),
        )
        .padding(12)
        .style(container::rounded_box)
        .into()
    }

    fn view_login(&self) -> Element<Message> {
        let form = column![
            text("Restricted access").size(24),
            text_input("Username", &self.login.user)
                .on_input(Message::LoginUserChanged)
                .padding(10),
            text_input("Password", &self.login.pass)
                .on_input(Message::LoginPassChanged)
                .secure(true)
                .padding(10),
            row![
                button(text("Back").size(14))
                    .on_press(Message::CancelLogin)
                    .style(button::secondary),
                button(text("Enter the panel").size(14)).on_press(Message::SubmitLogin),
            ]
            .spacing(12),
            text(&self.status).size(14),
        ]
        .spacing(16)
        .max_width(420);

        container(form)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn view_admin(&self) -> Element<Message> {
        if self.form.open {
            return self.view_form();
        }

        let header = row![
            text("ADMIN PANEL").size(28),
            horizontal_space(),
            button(text("New project").size(14)).on_press(Message::OpenForm),
            button(text("View site").size(14))
                .on_press(Message::BackToHome)
                .style(button::secondary),
            button(text("Log out").size(14))
                .on_press(Message::Logout)
                .style(button::danger),
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        let mut listing = Column::new().spacing(12);
        if self.store.all().is_empty() {
            listing = listing.push(
                container(text("No projects registered.").size(16))
                    .padding(40)
                    .center_x(Length::Fill),
            );
        } else {
            for project in self.store.all() {
                listing = listing.push(self.admin_row(project));
            }
        }

        let content = column![
            header,
            text(&self.status).size(14),
            scrollable(listing).height(Length::Fill),
        ]
        .spacing(16)
        .padding(24);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// One row of the admin listing: after-shot thumbnail, caption, actions
    fn admin_row<'a>(&'a self, project: &'a Project) -> Element<'a, Message> {
        let thumbnail: Element<Message> = match self.images.get(&project.id) {
            Some(images) => iced_image(images.after.clone())
                .width(Length::Fixed(120.0))
                .height(Length::Fixed(72.0))
                .content_fit(ContentFit::Cover)
                .into(),
            None => text("—").size(16).into(),
        };

        container(
            row![
                thumbnail,
                column![
                    text(&project.title).size(16),
                    text(project.category.to_string()).size(12),
                ]
                .spacing(4)
                .width(Length::Fill),
                button(text("Edit").size(14))
                    .on_press(Message::EditProject(project.id.clone()))
                    .style(button::secondary),
                button(text("Delete").size(14))
                    .on_press(Message::DeleteProject(project.id.clone()))
                    .style(button::danger),
            ]
            .spacing(12)
            .align_y(Alignment::Center),
        )
        .padding(10)
        .style(container::rounded_box)
        .into()
    }

    fn view_form(&self) -> Element<Message> {
        let heading = if self.form.editing.is_some() {
            "Edit project"
        } else {
            "New project"
        };

        let slots = row![self.slot_view(Slot::Before), self.slot_view(Slot::After)].spacing(16);

        // Submission stays disabled while either slot is processing
        let mut save = button(
            text(if self.form.pending() { "Processing…" } else { "Save" }).size(14),
        );
        if !self.form.pending() {
            save = save.on_press(Message::SubmitForm);
        }

        let form = column![
            text(heading).size(24),
            text_input("e.g. Master bathroom remodel", &self.form.title)
                .on_input(Message::TitleChanged)
                .padding(10),
            pick_list(
                Category::STORABLE,
                Some(self.form.category),
                Message::FormCategoryPicked
            ),
            slots,
            row![
                button(text("Cancel").size(14))
                    .on_press(Message::CancelForm)
                    .style(button::secondary),
                save,
            ]
            .spacing(12),
            text(&self.status).size(14),
        ]
        .spacing(16)
        .max_width(560);

        container(form)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    /// One image slot of the form: preview, state label, picker button
    fn slot_view(&self, slot: Slot) -> Element<Message> {
        let (label, preview, pending) = match slot {
            Slot::Before => (
                "Before photo",
                &self.form.before_preview,
                self.form.before_pending,
            ),
            Slot::After => (
                "After photo",
                &self.form.after_preview,
                self.form.after_pending,
            ),
        };

        let preview: Element<Message> = match preview {
            Some(handle) => iced_image(handle.clone())
                .width(Length::Fixed(220.0))
                .height(Length::Fixed(130.0))
                .content_fit(ContentFit::Cover)
                .into(),
            None => container(
                text(if pending { "Processing…" } else { "No photo yet" }).size(13),
            )
            .padding(40)
            .into(),
        };

        let mut picker = button(
            text(if pending { "Please wait" } else { "Choose file" }).size(14),
        )
        .style(button::secondary);
        if !pending {
            picker = picker.on_press(Message::PickImage(slot));
        }

        column![text(label).size(13), preview, picker]
            .spacing(8)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application("Pedreiro Oficial", Portfolio::update, Portfolio::view)
        .theme(Portfolio::theme)
        .centered()
        .run_with(Portfolio::new)
}
